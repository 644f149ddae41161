//! Refiner system entry points.

mod service;

pub use revise_refiner_api::{
    Refinement, Refiner, RefinerError, RefinerRegistry, RefinerResult, RefinerSummary,
};
pub use revise_refiners::{
    default_registry, AnnotationOptions, AnnotationRefiner, CommandRefiner, CommandSpec,
};

pub use service::RefinerService;
