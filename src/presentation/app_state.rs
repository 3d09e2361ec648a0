// Application state for HTTP handlers
use crate::application::canvas_service::CanvasService;
use crate::application::filter_service::FilterService;

#[derive(Clone)]
pub struct AppState {
    pub canvas_service: CanvasService,
    pub filter_service: FilterService,
}
