use std::collections::HashMap;

use axum::{
    extract::{Form, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

pub const SERVICE_PATH: &str = "/ean-services/rs/hotel/v3";

/// API keys that make the gateway answer 403 with a specific body.
pub const DENIALS: [(&str, &str); 7] = [
    ("forbidden", "<h1>Forbidden</h1>"),
    ("inactive", "<h1>Developer Inactive</h1>"),
    ("qps", "<h1>Account Over Queries Per Second Limit</h1>"),
    ("over-rate", "<h1>Account Over Rate Limit</h1>"),
    ("exceeded", "<h1>Rate Limit Exceeded</h1>"),
    ("bad-auth", "<h1>Authentication Failure</h1>"),
    ("weird", "<h1>Gateway Timeout</h1>"),
];

pub const AMBIGUOUS_DESTINATION: &str = "Springfield";

type Params = HashMap<String, String>;

pub fn app() -> Router {
    Router::new().route(
        &format!("{SERVICE_PATH}/{{method}}"),
        get(query_call).post(form_call),
    )
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn query_call(Path(method): Path<String>, Query(params): Query<Params>) -> Response {
    respond(&method, &params, false)
}

async fn form_call(Path(method): Path<String>, Form(params): Form<Params>) -> Response {
    respond(&method, &params, true)
}

fn respond(method: &str, params: &Params, form: bool) -> Response {
    debug!(method, form, "mock call");

    let Some(api_key) = params.get("apiKey") else {
        return (StatusCode::FORBIDDEN, "<h1>Not Authorized</h1>").into_response();
    };
    if let Some((_, body)) = DENIALS.iter().find(|(key, _)| *key == api_key.as_str()) {
        return (StatusCode::FORBIDDEN, *body).into_response();
    }

    let session_id = params
        .get("customerSessionId")
        .cloned()
        .unwrap_or_else(|| Uuid::new_v4().simple().to_string());

    let body = match (method, form) {
        ("list", false) => hotel_list(params, &session_id),
        ("info", false) => hotel_info(params, &session_id),
        ("ping", false) => json!({
            "PingResponse": {
                "customerSessionId": session_id,
                "echo": params.get("echo").cloned().unwrap_or_default(),
                "cid": params.get("cid"),
            }
        }),
        ("res", true) => json!({
            "HotelRoomReservationResponse": {
                "customerSessionId": session_id,
                "itineraryId": 1_000_042,
                "hotelId": params.get("hotelId"),
                "reservationStatusCode": "CF",
            }
        }),
        _ => ws_error(
            &format!("{method}Response"),
            "TravelNow.com cannot service this request.",
            &session_id,
        ),
    };
    Json(body).into_response()
}

fn hotel_list(params: &Params, session_id: &str) -> Value {
    if params.get("arrivalDate").is_some_and(|d| d == "bogus") {
        return ws_error(
            "HotelListResponse",
            "Data in this request could not be validated: arrivalDate",
            session_id,
        );
    }
    if params.get("destinationString").map(String::as_str) == Some(AMBIGUOUS_DESTINATION) {
        return json!({
            "HotelListResponse": {
                "customerSessionId": session_id,
                "EanWsError": {
                    "presentationMessage": "Multiple locations found.",
                    "category": "RESULT_NULL",
                    "handling": "RECOVERABLE"
                },
                "LocationInfos": {
                    "@size": "2",
                    "LocationInfo": [
                        {"destinationId": "SPI-IL", "type": 1, "city": "Springfield",
                         "stateProvinceCode": "IL", "countryCode": "US"},
                        {"destinationId": "SGF-MO", "type": 1, "city": "Springfield",
                         "stateProvinceCode": "MO", "countryCode": "US"}
                    ]
                }
            }
        });
    }
    json!({
        "HotelListResponse": {
            "customerSessionId": session_id,
            "HotelList": {
                "@size": "1",
                "HotelSummary": [{
                    "hotelId": 106347,
                    "name": "Harbor View Inn",
                    "city": params.get("city").cloned().unwrap_or_default(),
                    "amenityMask": 1 | (1 << 7) | (1 << 27)
                }]
            }
        }
    })
}

fn hotel_info(params: &Params, session_id: &str) -> Value {
    json!({
        "HotelInformationResponse": {
            "customerSessionId": session_id,
            "@hotelId": params.get("hotelId"),
            "HotelSummary": {
                "name": "Harbor View Inn",
                "locale": params.get("locale"),
                "currencyCode": params.get("currencyCode")
            }
        }
    })
}

fn ws_error(root: &str, message: &str, session_id: &str) -> Value {
    json!({
        root: {
            "customerSessionId": session_id,
            "EanWsError": {
                "presentationMessage": message,
                "category": "EXCEPTION",
                "handling": "UNRECOVERABLE"
            }
        }
    })
}
