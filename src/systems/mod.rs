mod wander;

pub use wander::WanderSystem;
