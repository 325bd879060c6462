mod drill;
mod topics;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use drill::DrillView;
pub use topics::TopicsView;
