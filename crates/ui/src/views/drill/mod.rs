mod drill;
mod progress;
mod scripts;
mod visualizer;

pub use drill::DrillView;
