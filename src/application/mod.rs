// Application layer - Use cases and the layout / filter engines
pub mod canvas_service;
pub mod compatibility;
pub mod dashboard_store;
pub mod filter_evaluator;
pub mod filter_service;
pub mod layout_compactor;
pub mod position_allocator;
