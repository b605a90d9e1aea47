pub mod chain;
pub mod clock;
pub mod frame;
pub mod standard;
pub mod surface;
pub mod viewer;
