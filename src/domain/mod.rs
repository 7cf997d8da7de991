// Domain layer - Storm track models and pure rules
pub mod error;
pub mod intensity;
pub mod layout;
pub mod metrics;
pub mod observation;
pub mod scene;
pub mod storm;
pub mod track;
