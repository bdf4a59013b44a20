//! Front-end controllers and the ports they call.

#![forbid(unsafe_code)]

mod conflict_detection_controller;
mod constraint_submission_controller;
mod gateway_ports;
mod log_retrieval_controller;
mod pagination_renderer;
mod request_state;
mod staggered_list_renderer;

pub use conflict_detection_controller::{
    CONFLICT_DETECTION_FAILED_ALERT, ConflictDetectionController, ConflictPresentation,
};
pub use constraint_submission_controller::{
    ConstraintSubmissionController, SUBMISSION_EMPTY_MESSAGE, SUBMISSION_FAILED_MESSAGE,
};
pub use gateway_ports::{
    ActionConstraintGateway, ActivityLogGateway, ConflictDetectionGateway,
    ConflictDetectionResponse,
};
pub use log_retrieval_controller::{
    LOG_FETCH_FAILED_MESSAGE, LogFetchTicket, LogRetrievalController,
};
pub use pagination_renderer::{NumberedLogRow, PageControl, PaginationRenderer, RenderedPage};
pub use request_state::{RequestState, RequestTicket, StaleResponsePolicy};
pub use staggered_list_renderer::{
    CONSTRAINTS_EMPTY_MESSAGE, CONSTRAINTS_FAILED_MESSAGE, CONSTRAINTS_LOADING_MESSAGE,
    CONSTRAINTS_MISSING_DATE_MESSAGE, ConstraintRow, DEFAULT_REVEAL_STAGGER, RevealQueue,
    RevealSink, StaggeredListRenderer,
};
