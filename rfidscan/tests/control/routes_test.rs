#[path = "../common/mod.rs"]
mod common;

use rfidscan::config::{OperatingMode, SharedState};
use rfidscan::console::SystemInfo;
use rfidscan::control::{Request, RequestContext, Response};
use rfidscan::platform::HostPlatform;
use rfidscan::signal::BeepPattern;
use rfidscan::test_support::default_shared;

fn call(shared: &mut SharedState, platform: &mut HostPlatform, req: Request) -> Response {
    let info = SystemInfo {
        uptime_s: 77,
        reader_version: Some(0x92),
        free_heap: 0,
    };
    RequestContext::new(shared, platform, info).handle(&req)
}

fn send(shared: &mut SharedState, req: Request) -> Response {
    call(shared, &mut HostPlatform::new(), req)
}

#[test]
fn command_route_switches_modes() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::post("/api/command").param("cmd", "FORMAT"));
    assert_eq!(resp.status, 200);
    assert_eq!(shared.mode(), &OperatingMode::Format);

    let resp = send(&mut shared, Request::post("/api/command").param("cmd", "STOP"));
    assert_eq!(resp.status, 200);
    assert!(!shared.is_scanning());

    let resp = send(&mut shared, Request::post("/api/command").param("cmd", "ERASE"));
    assert_eq!(resp.status, 400);
    assert_eq!(shared.mode(), &OperatingMode::Format);

    let resp = send(&mut shared, Request::post("/api/command"));
    assert_eq!(resp.status, 400);
}

#[test]
fn write_route_needs_data() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::post("/api/write"));
    assert_eq!(resp.status, 400);
    assert_eq!(shared.mode(), &OperatingMode::Read);

    let resp = send(
        &mut shared,
        Request::post("/api/write").param("data", "0123456789ABCDEFXYZ"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "Ready to write: 0123456789ABCDE");
    assert!(matches!(shared.mode(), OperatingMode::Write(_)));
}

#[test]
fn status_requires_access_code() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::get("/api/status"));
    assert_eq!(resp.status, 403);
    let resp = send(&mut shared, Request::get("/api/status").param("code", "9999"));
    assert_eq!(resp.status, 403);

    let mut platform = HostPlatform::new();
    platform.free_heap = 4242;
    let resp = call(
        &mut shared,
        &mut platform,
        Request::get("/api/status").param("code", "1234"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(resp.content_type, "application/json");
    let json: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(json["mode"], "READ");
    assert_eq!(json["scanning"], true);
    assert_eq!(json["uptime"], 77);
    assert_eq!(json["memory"], 4242);
    assert_eq!(json["scanDelay"], 1000);
}

#[test]
fn lastcard_requires_access_code() {
    let mut shared = default_shared();
    assert_eq!(send(&mut shared, Request::get("/api/lastcard")).status, 403);
    let resp = send(&mut shared, Request::get("/api/lastcard").param("code", "1234"));
    assert_eq!(resp.body, "No card");
}

#[test]
fn scan_delay_get_and_clamped_set() {
    let mut shared = default_shared();
    assert_eq!(send(&mut shared, Request::get("/api/scandelay")).body, "1000");
    let resp = send(&mut shared, Request::post("/api/scandelay").param("delay", "100"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "500");
    assert_eq!(shared.config().scan_interval_ms, 500);
    let resp = send(&mut shared, Request::post("/api/scandelay").param("delay", "soon"));
    assert_eq!(resp.status, 400);
}

#[test]
fn read_memory_toggle() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::post("/api/readmemory").param("enabled", "0"));
    assert_eq!(resp.body, "0");
    assert!(!shared.config().read_memory_enabled);
    assert_eq!(send(&mut shared, Request::get("/api/readmemory")).body, "0");
    let resp = send(&mut shared, Request::post("/api/readmemory").param("enabled", "maybe"));
    assert_eq!(resp.status, 400);
}

#[test]
fn api_url_is_validated() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::post("/api/setapiurl").param("url", "nope"));
    assert_eq!(resp.status, 400);
    let resp = send(
        &mut shared,
        Request::post("/api/setapiurl").param("url", "https://example.org/rfid"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(
        send(&mut shared, Request::get("/api/apiurl")).body,
        "https://example.org/rfid"
    );
}

#[test]
fn wifi_config_round_trip_and_limits() {
    let mut shared = default_shared();
    let resp = send(
        &mut shared,
        Request::post("/api/setwificonfig")
            .param("ssid", "workshop")
            .param("pass", "hunter22"),
    );
    assert_eq!(resp.status, 200);
    let resp = send(&mut shared, Request::get("/api/wificonfig"));
    let json: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(json["ssid"], "workshop");
    assert_eq!(json["pass"], "hunter22");

    let resp = send(
        &mut shared,
        Request::post("/api/setwificonfig")
            .param("ssid", &"x".repeat(33))
            .param("pass", ""),
    );
    assert_eq!(resp.status, 400);
    assert_eq!(shared.config().wifi.ssid, "workshop");
}

#[test]
fn web_code_change_needs_current_code() {
    let mut shared = default_shared();
    let resp = send(
        &mut shared,
        Request::post("/api/webcode").param("current", "0000").param("code", "5678"),
    );
    assert_eq!(resp.status, 403);

    let resp = send(
        &mut shared,
        Request::post("/api/webcode").param("current", "1234").param("code", "5678"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(send(&mut shared, Request::get("/api/status").param("code", "1234")).status, 403);
    assert_eq!(send(&mut shared, Request::get("/api/webcode").param("code", "5678")).body, "5678");
}

#[test]
fn buzzer_queues_validated_pattern() {
    let mut shared = default_shared();
    let resp = send(
        &mut shared,
        Request::post("/api/buzzer").param("times", "2").param("duration", "300"),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(shared.take_pending_beep(), Some(BeepPattern::new(2, 300).unwrap()));

    let resp = send(
        &mut shared,
        Request::post("/api/buzzer").param("times", "20").param("duration", "300"),
    );
    assert_eq!(resp.status, 400);
    assert_eq!(shared.take_pending_beep(), None);
}

#[test]
fn api_log_is_json_array() {
    let mut shared = default_shared();
    let resp = send(&mut shared, Request::get("/api/apilog"));
    assert_eq!(resp.status, 200);
    assert_eq!(resp.body, "[]");
}

#[test]
fn restart_and_update_go_to_the_platform() {
    let mut shared = default_shared();
    let mut platform = HostPlatform::new();
    let resp = call(&mut shared, &mut platform, Request::post("/update"));
    assert_eq!(resp.status, 500);
    assert!(!platform.restart_requested);

    let resp = call(
        &mut shared,
        &mut platform,
        Request::post("/update").body(vec![0xE9; 256]),
    );
    assert_eq!(resp.status, 200);
    assert_eq!(platform.installed_image_len, Some(256));

    let mut platform = HostPlatform::new();
    call(&mut shared, &mut platform, Request::get("/restart"));
    assert!(platform.restart_requested);
}

#[test]
fn unknown_route_is_404() {
    let mut shared = default_shared();
    assert_eq!(send(&mut shared, Request::get("/api/nothing")).status, 404);
    // Setters only answer POST
    assert_eq!(send(&mut shared, Request::get("/api/setapiurl")).status, 404);
}
