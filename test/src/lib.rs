pub mod helpers;
pub mod motion;
pub mod scenario;

pub use helpers::*;
pub use motion::{ConstantMotion, MotionSource, NoiseMotion, SineMotion};
pub use scenario::{TestNode, TestSession};
