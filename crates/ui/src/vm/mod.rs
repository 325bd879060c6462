mod drill_vm;

pub use drill_vm::DrillVm;
