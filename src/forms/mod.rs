//! Form state, declarative validation, normalization and the submission
//! dispatcher shared by every auth screen.

pub mod normalize;
pub mod schema;
pub mod submission;
pub mod values;

pub use schema::Schema;
pub use submission::{Form, FormFlow, FormState, SubmitOutcome};
pub use values::{FieldErrors, FieldValue, FormValues};
