// Application state for HTTP handlers
use crate::application::plot_service::PlotService;
use crate::application::storm_service::StormService;

#[derive(Clone)]
pub struct AppState {
    pub storm_service: StormService,
    pub plot_service: PlotService,
}
