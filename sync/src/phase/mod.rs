//! # Phase matching
//!
//! Pure functions relating a timeline position to the sync markers around
//! it. A [`PhasePosition`](crate::PhasePosition) names the markers behind and
//! ahead of a position and how far between them it sits, which lets one
//! timeline's phase be reproduced on another timeline with a different length
//! or a different number of markers.
//!
//! | step                          | function                               |
//! |-------------------------------|----------------------------------------|
//! | pair around a position        | `nearest_valid_markers_at`             |
//! | phase of a position           | `calculate_phase_position`             |
//! | position of a phase           | `time_from_phase_position`             |
//! | markers crossed while playing | `advance_and_collect_markers_passed`   |
//! | replay crossings elsewhere    | `replay_markers_passed`                |
//! | compare marker patterns       | `can_phase_match`                      |

pub mod marker_pair;
pub mod marker_search;
pub mod marker_walk;
pub mod phase_matcher;
pub mod phase_position;
