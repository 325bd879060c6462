use super::test_harness::{ViewKind, setup_view_harness};

#[tokio::test(flavor = "current_thread")]
async fn topics_view_lists_every_builtin_topic() {
    let mut harness = setup_view_harness(ViewKind::Topics);
    harness.rebuild();

    let html = harness.render();
    for title in [
        "Simple Present",
        "Present Continuous",
        "Simple Past",
        "Past Continuous",
        "Present Perfect",
        "Simple Future",
        "Future Continuous",
        "Conditionals",
    ] {
        assert!(html.contains(title), "missing {title} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn drill_view_loads_a_bank_sentence() {
    let mut harness = setup_view_harness(ViewKind::Drill("simple-past"));
    harness.rebuild();
    for _ in 0..3 {
        harness.drive_async().await;
    }

    let html = harness.render();
    assert!(
        html.contains("I visited Paris last summer"),
        "missing sentence in {html}"
    );
    assert!(html.contains("Score"), "missing score panel in {html}");
    assert!(html.contains("Record"), "missing record control in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn drill_view_rejects_unknown_topics() {
    let mut harness = setup_view_harness(ViewKind::Drill("past-perfect"));
    harness.rebuild();

    let html = harness.render();
    assert!(
        html.contains("That topic does not exist."),
        "missing error in {html}"
    );
}
