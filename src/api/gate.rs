use axum::{
    body::{Body, Bytes, to_bytes},
    extract::{FromRequest, Multipart, Request, State},
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{ApiError, AppState};

/// Body returned whenever the gate trips.
pub const REJECTION_MESSAGE: &str = "Potential SQL injection detected";

/// Most bytes the gate will buffer, matching the cap axum's extractors
/// apply by default.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

enum FormKind {
    UrlEncoded,
    Multipart,
}

/// Screens every form submission, whatever route it targets, before any
/// handler runs. Urlencoded and multipart bodies are buffered and each
/// submitted value is checked against the configured blacklist. A hit
/// answers 403 on the spot; otherwise the request continues with its body
/// restored.
pub async fn reject_sql_injection(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(kind) = form_kind(request.headers()) else {
        return Ok(next.run(request).await);
    };

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, BODY_LIMIT).await?;

    let blocked = match kind {
        FormKind::UrlEncoded => form_urlencoded::parse(&bytes)
            .any(|(_, value)| value_is_blacklisted(&value, &state.config.blacklist)),
        FormKind::Multipart => {
            multipart_has_blacklisted_value(&parts.headers, bytes.clone(), &state.config.blacklist)
                .await
        }
    };

    if blocked {
        tracing::warn!("Request gate tripped on {} {}", parts.method, parts.uri);
        return Ok((StatusCode::FORBIDDEN, REJECTION_MESSAGE).into_response());
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}

/// Media types are compared case-insensitively with parameters such as
/// `charset` or `boundary` ignored.
fn form_kind(headers: &HeaderMap) -> Option<FormKind> {
    let content_type = headers.get(CONTENT_TYPE)?.to_str().ok()?;
    let media_type = content_type.split(';').next().unwrap_or(content_type).trim();

    if media_type.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        Some(FormKind::UrlEncoded)
    } else if media_type.eq_ignore_ascii_case("multipart/form-data") {
        Some(FormKind::Multipart)
    } else {
        None
    }
}

/// Text fields are form values; parts carrying a filename are uploads and
/// stay uninspected. A body the parser cannot read has no values to screen
/// and falls through to whatever extractor sits downstream.
async fn multipart_has_blacklisted_value(
    headers: &HeaderMap,
    bytes: Bytes,
    blacklist: &str,
) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE) else {
        return false;
    };
    let Ok(request) = Request::builder()
        .header(CONTENT_TYPE, content_type.clone())
        .body(Body::from(bytes))
    else {
        return false;
    };
    let Ok(mut multipart) = Multipart::from_request(request, &()).await else {
        return false;
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.file_name().is_some() {
            continue;
        }
        if let Ok(value) = field.text().await {
            if value_is_blacklisted(&value, blacklist) {
                return true;
            }
        }
    }

    false
}

/// Only submitted values are inspected, never field names. Each blacklist
/// character trips on its own, so a lone `-` is rejected even though the
/// SQL comment marker is the two-character `--`, while keyword payloads
/// like `OR 1=1` sail through untouched.
#[must_use]
pub fn value_is_blacklisted(value: &str, blacklist: &str) -> bool {
    blacklist.chars().any(|c| value.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    const BLACKLIST: &str = "';--\"";

    fn headers_with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_form_kind_matches_media_types_case_insensitively() {
        assert!(matches!(
            form_kind(&headers_with_content_type(
                "application/x-www-form-urlencoded"
            )),
            Some(FormKind::UrlEncoded)
        ));
        assert!(matches!(
            form_kind(&headers_with_content_type(
                "Application/x-www-form-URLENCODED; charset=UTF-8"
            )),
            Some(FormKind::UrlEncoded)
        ));
        assert!(matches!(
            form_kind(&headers_with_content_type(
                "Multipart/Form-Data; boundary=xyz"
            )),
            Some(FormKind::Multipart)
        ));
    }

    #[test]
    fn test_form_kind_ignores_non_form_bodies() {
        assert!(form_kind(&HeaderMap::new()).is_none());
        assert!(form_kind(&headers_with_content_type("application/json")).is_none());
        assert!(form_kind(&headers_with_content_type("text/plain")).is_none());
    }

    #[test]
    fn test_each_blacklisted_character_trips() {
        assert!(value_is_blacklisted("it's", BLACKLIST));
        assert!(value_is_blacklisted("a;b", BLACKLIST));
        assert!(value_is_blacklisted("dash-dash", BLACKLIST));
        assert!(value_is_blacklisted("say \"hi\"", BLACKLIST));
    }

    #[test]
    fn test_classic_quoted_payload_trips() {
        assert!(value_is_blacklisted("' OR '1'='1", BLACKLIST));
    }

    #[test]
    fn test_keyword_payload_without_special_characters_passes() {
        assert!(!value_is_blacklisted("OR 1=1", BLACKLIST));
        assert!(!value_is_blacklisted("UNION SELECT password FROM user", BLACKLIST));
    }

    #[test]
    fn test_plain_values_pass() {
        assert!(!value_is_blacklisted("admin", BLACKLIST));
        assert!(!value_is_blacklisted("", BLACKLIST));
    }
}
