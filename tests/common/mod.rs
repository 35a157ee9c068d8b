//! Shared helpers for integration tests

use std::sync::Once;

use serde_json::{json, Value};
use tracing_subscriber::{fmt, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Installs a tracing subscriber once per test binary. Honors `RUST_LOG`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// A unit as returned by the content API, with its ancestors and components
#[allow(dead_code)]
pub fn unit_payload() -> Value {
    json!({
        "id": "block-v1:edX+Demo+2014+type@vertical+block@unit",
        "display_name": "Unit",
        "category": "vertical",
        "studio_url": "/container/block-v1:edX+Demo+2014+type@vertical+block@unit",
        "has_changes": false,
        "published": true,
        "visible_to_staff_only": false,
        "edited_on": "2014-07-01T10:30:00Z",
        "edited_by": "staff",
        "published_on": "2014-07-01T10:31:00Z",
        "published_by": "staff",
        "released_to_students": true,
        "release_date": "1970-01-01T00:00:00Z",
        "release_date_from": "Test Section",
        "ancestor_info": {
            "ancestors": [
                {"id": "course", "display_name": "Demo Course", "category": "course"},
                {"id": "section", "display_name": "Test Section", "category": "chapter"},
                {"id": "subsection", "display_name": "Test Subsection", "category": "sequential"}
            ]
        },
        "child_info": {
            "category": "html",
            "display_name": "Component",
            "children": [
                {"id": "html-1", "display_name": "Intro", "category": "html", "data": "<p>Hi</p>"},
                {"id": "discussion-1", "display_name": "Discuss", "category": "discussion"}
            ]
        }
    })
}
