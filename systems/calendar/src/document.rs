use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::CalendarError;

/// Calendar exactly as delivered by the contribution API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCalendar {
    /// Total reported by the API; informational only, the summary is recomputed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_contributions: Option<u64>,
    /// Week columns in calendar order.
    pub weeks: Vec<RawWeek>,
}

/// Single week column of a raw calendar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWeek {
    /// Days of the week in calendar order.
    pub contribution_days: Vec<RawDay>,
}

/// Single day entry of a raw calendar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDay {
    /// Activity count; signed so that invalid input can be reported instead of
    /// failing deserialization.
    pub contribution_count: i64,
    /// Calendar date in ISO format.
    pub date: NaiveDate,
    /// Day of week reported by the API, Sunday being zero.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    /// Display color suggested by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl RawCalendar {
    /// Parses a calendar from JSON.
    ///
    /// Accepts the bare calendar object, the GraphQL `data` payload
    /// (`{"user": {...}}`) or the full GraphQL response
    /// (`{"data": {"user": {...}}, "errors": [...]}`).
    pub fn from_json(json: &str) -> Result<Self, CalendarError> {
        let document: CalendarDocument = serde_json::from_str(json)?;
        match document {
            CalendarDocument::Calendar(calendar) => Ok(calendar),
            CalendarDocument::Response { data, errors } => {
                let messages = errors.into_iter().map(|error| error.message).collect();
                data.and_then(|data| data.user)
                    .map(UserNode::into_calendar)
                    .ok_or(CalendarError::MissingUser(messages))
            }
            CalendarDocument::Data(data) => data
                .user
                .map(UserNode::into_calendar)
                .ok_or_else(|| CalendarError::MissingUser(Vec::new())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CalendarDocument {
    Calendar(RawCalendar),
    Response {
        #[serde(deserialize_with = "Option::deserialize")]
        data: Option<ResponseData>,
        #[serde(default)]
        errors: Vec<ApiError>,
    },
    Data(ResponseData),
}

#[derive(Deserialize)]
struct ResponseData {
    #[serde(deserialize_with = "Option::deserialize")]
    user: Option<UserNode>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    contributions_collection: ContributionsCollection,
}

impl UserNode {
    fn into_calendar(self) -> RawCalendar {
        self.contributions_collection.contribution_calendar
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContributionsCollection {
    contribution_calendar: RawCalendar,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}
