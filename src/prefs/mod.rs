//! Beta preference model and assembly.
//!
//! This module is split into logical submodules:
//! - [`declaration`]: provider-supplied feature declarations and their
//!   ordered, last-writer-wins collection
//! - [`state`]: the tri-state per-user feature value
//! - [`fields`]: the assembled field descriptions handed to the form layer
//! - [`synthetic`]: the fixed fields rendered ahead of any feature
//! - [`assembly`]: the engine tying it all together

pub mod assembly;
pub mod declaration;
pub mod fields;
pub mod state;
pub mod synthetic;

pub use assembly::{
    Assembly, AssemblyContext, FeatureMeta, FeatureProvider, Gate, GateMap, GateProvider,
    PreferenceRegistry,
};
pub use declaration::{DeclarationSet, FeatureDeclaration, FeatureRequirements, LinkRef};
pub use fields::{FeatureFieldParams, FieldKind, PreferenceField, ToggleParams};
pub use state::{FeatureState, OPTION_DISABLED, OPTION_ENABLED};
pub use synthetic::{AUTO_ENROLL_ALL, POPUP_DISABLE};
