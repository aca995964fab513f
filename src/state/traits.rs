//! Traits shared by state holders.

/// Trait for creating render-ready snapshots.
///
/// Snapshots are immutable captures of state sent to the render thread.
/// They decouple state ownership from rendering.
pub trait Snapshot {
    /// The snapshot type produced.
    type Output;

    /// Creates an immutable snapshot for rendering.
    fn create_snapshot(&self) -> Self::Output;
}
