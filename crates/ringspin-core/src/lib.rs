pub mod color;
pub mod error;
pub mod options;
pub mod registry;
pub mod ring;
pub mod scene;
pub mod scheduler;
pub mod spinner;
pub mod surface;

pub use color::{ColorParser, CssColorParser, Rgb};
pub use error::{CoreError, Result};
pub use options::{SpinnerOptions, SpinnerOverrides};
pub use registry::SpinnerRegistry;
pub use scene::{Scene, SceneShape, ShapeId};
pub use scheduler::{ManualScheduler, Scheduler, TimerId};
pub use spinner::{AnimationState, RingSpinner};
pub use surface::{DrawingSurface, Mount, Transform};
