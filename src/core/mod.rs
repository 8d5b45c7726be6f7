pub mod fields;
pub mod noise;
pub mod profiles;
pub mod sampling;
pub mod scale;
pub mod seawater;
pub mod types;

pub use fields::ScalarField;
pub use noise::NoiseSource;
pub use scale::{AxisScale, LinearScale, LogScale, PixelSpan, ScaleKind};
pub use seawater::{OceanProfile, PycnoclineScenario};
pub use types::{PanelId, PixelRect, Viewport};
