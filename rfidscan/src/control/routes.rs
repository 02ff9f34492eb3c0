// rfidscan/src/control/routes.rs

use serde::Serialize;

use super::{Method, Request, RequestContext, Response};
use crate::config::OperatingMode;
use crate::console::ConsoleCommand;
use crate::signal::BeepPattern;

#[derive(Serialize)]
struct Status<'a> {
    mode: &'a str,
    scanning: bool,
    uptime: u64,
    memory: u32,
    reader: Option<u8>,
    #[serde(rename = "scanDelay")]
    scan_delay: u64,
    #[serde(rename = "readMemory")]
    read_memory: bool,
}

pub(super) fn dispatch(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    match (req.method, req.path.as_str()) {
        (_, "/api/command") => command(ctx, req),
        (_, "/api/write") => write(ctx, req),
        (Method::Get, "/api/status") => status(ctx, req),
        (Method::Get, "/api/lastcard") => last_card(ctx, req),
        (Method::Get, "/api/apilog") => api_log(ctx),
        (_, "/api/buzzer") => buzzer(ctx, req),
        (Method::Get, "/api/apiurl") => Response::ok(ctx.shared.config().api_url.clone()),
        (Method::Post, "/api/setapiurl") => set_api_url(ctx, req),
        (Method::Get, "/api/wificonfig") => Response::json(&ctx.shared.config().wifi),
        (Method::Post, "/api/setwificonfig") => set_wifi(ctx, req),
        (Method::Get, "/api/scandelay") => {
            Response::ok(ctx.shared.config().scan_interval_ms.to_string())
        }
        (Method::Post, "/api/scandelay") => set_scan_delay(ctx, req),
        (Method::Get, "/api/readmemory") => {
            let on = ctx.shared.config().read_memory_enabled;
            Response::ok(if on { "1" } else { "0" })
        }
        (Method::Post, "/api/readmemory") => set_read_memory(ctx, req),
        (Method::Get, "/api/webcode") => web_code(ctx, req),
        (Method::Post, "/api/webcode") => set_web_code(ctx, req),
        (_, "/restart") => {
            ctx.platform.request_restart();
            Response::ok("Restarting")
        }
        (Method::Post, "/update") => update(ctx, req),
        _ => Response::not_found(),
    }
}

fn authorized(ctx: &RequestContext<'_>, req: &Request, name: &str) -> bool {
    req.arg(name)
        .is_some_and(|code| ctx.shared.check_access_code(code))
}

fn command(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let Some(cmd) = req.arg("cmd") else {
        return Response::bad_request("Missing cmd");
    };
    let line = match req.arg("data") {
        Some(data) => format!("{} {}", cmd, data),
        None => cmd.to_string(),
    };
    match line.parse::<ConsoleCommand>() {
        Ok(cmd) => {
            let reply = cmd.apply(ctx.shared, &ctx.info);
            Response::ok(reply)
        }
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn write(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let data = req.arg("data").unwrap_or("");
    match ctx.shared.select_mode("WRITE", Some(data)) {
        Ok(mode) => Response::ok(format!("Ready to write: {}", payload_text(mode))),
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn payload_text(mode: &OperatingMode) -> String {
    match mode {
        OperatingMode::Write(p) => p.to_text(),
        other => other.to_string(),
    }
}

fn status(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    if !authorized(ctx, req, "code") {
        return Response::forbidden();
    }
    let config = ctx.shared.config();
    Response::json(&Status {
        mode: ctx.shared.mode().name(),
        scanning: ctx.shared.is_scanning(),
        uptime: ctx.info.uptime_s,
        memory: ctx.platform.free_heap(),
        reader: ctx.info.reader_version,
        scan_delay: config.scan_interval_ms,
        read_memory: config.read_memory_enabled,
    })
}

fn last_card(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    if !authorized(ctx, req, "code") {
        return Response::forbidden();
    }
    Response::ok(ctx.shared.last_result().to_string())
}

fn api_log(ctx: &mut RequestContext<'_>) -> Response {
    match ctx.shared.sink().log().to_json() {
        Ok(body) => Response {
            status: 200,
            content_type: "application/json",
            body,
        },
        Err(e) => Response::text(500, e.to_string()),
    }
}

fn buzzer(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let times = req.arg("times").unwrap_or("1").parse::<u8>();
    let duration = req.arg("duration").unwrap_or("100").parse::<u16>();
    let (Ok(times), Ok(duration)) = (times, duration) else {
        return Response::bad_request("times and duration must be numbers");
    };
    match BeepPattern::new(times, duration) {
        Ok(pattern) => {
            ctx.shared.request_beep(pattern);
            Response::ok(format!("Buzzer: {} x {} ms", times, duration))
        }
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn set_api_url(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let Some(url) = req.arg("url") else {
        return Response::bad_request("Missing url");
    };
    match ctx.shared.set_api_url(url.trim()) {
        Ok(()) => Response::ok("API URL saved"),
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn set_wifi(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let (Some(ssid), Some(pass)) = (req.arg("ssid"), req.arg("pass")) else {
        return Response::bad_request("Missing ssid or pass");
    };
    match ctx.shared.set_wifi_credentials(ssid, pass) {
        Ok(()) => Response::ok("WiFi settings saved, restart to apply"),
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn set_scan_delay(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let Some(Ok(ms)) = req.arg("delay").map(|d| d.trim().parse::<u64>()) else {
        return Response::bad_request("Missing or invalid delay");
    };
    match ctx.shared.set_scan_interval_ms(ms) {
        Ok(effective) => Response::ok(effective.to_string()),
        Err(e) => Response::text(500, e.to_string()),
    }
}

fn set_read_memory(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    let enabled = match req.arg("enabled") {
        Some("1") | Some("true") => true,
        Some("0") | Some("false") => false,
        _ => return Response::bad_request("enabled must be 0 or 1"),
    };
    match ctx.shared.set_read_memory_enabled(enabled) {
        Ok(()) => Response::ok(if enabled { "1" } else { "0" }),
        Err(e) => Response::text(500, e.to_string()),
    }
}

fn web_code(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    if !authorized(ctx, req, "code") {
        return Response::forbidden();
    }
    Response::ok(ctx.shared.config().web_access_code.clone())
}

fn set_web_code(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    if !authorized(ctx, req, "current") {
        return Response::forbidden();
    }
    let Some(code) = req.arg("code") else {
        return Response::bad_request("Missing code");
    };
    match ctx.shared.set_web_access_code(code.trim()) {
        Ok(()) => Response::ok("Access code saved"),
        Err(e) => Response::bad_request(e.to_string()),
    }
}

fn update(ctx: &mut RequestContext<'_>, req: &Request) -> Response {
    match ctx.platform.apply_update(&req.body) {
        Ok(()) => Response::ok("Update OK, restarting"),
        Err(e) => Response::text(500, format!("Update failed: {}", e)),
    }
}
