// Application layer - Track pipeline and use cases
pub mod layout_planner;
pub mod metrics_calculator;
pub mod plot_assembler;
pub mod plot_service;
pub mod sanitizer;
pub mod storm_repository;
pub mod storm_service;
pub mod track_plotter;
