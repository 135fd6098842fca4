pub mod form;
pub mod response;
pub mod result;
pub mod sample;
pub mod trip;

pub use form::TripFormData;
pub use response::ItineraryDraft;
pub use result::PlanResult;
pub use sample::{sample_itinerary, SAMPLE_ITINERARY_ID};
pub use trip::{
    day_count, Activity, ActivityCategory, DayPlan, Itinerary, Pace, TimeOfDay, TripConstraints,
    TripProfile, WalkingTolerance,
};
