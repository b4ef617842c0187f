//! Entry point for the hwdash TUI. Parses args and runs the App.

use hwdash::app::App;
use hwdash::settings::{self, load_settings, save_settings, Overrides};
use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const USAGE_FLAGS: &str =
    "[--host HOST|-H HOST] [--port PORT|-p PORT] [--tick-ms MS] [--save] [--dry-run] [--demo] [ws://HOST:PORT/ws]";

#[derive(Debug, Default)]
struct ParsedArgs {
    url: Option<String>,
    overrides: Overrides,
    save: bool,
    dry_run: bool,
    demo: bool,
}

// Why parsing stopped: help was asked for (exit 0) or the arguments are wrong
#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    Help(String),
    Invalid(String),
}

fn parse_number<T: std::str::FromStr>(flag: &str, v: Option<String>) -> Result<T, ArgsError> {
    let v = v.ok_or_else(|| ArgsError::Invalid(format!("{flag} needs a value")))?;
    v.parse::<T>()
        .map_err(|_| ArgsError::Invalid(format!("invalid value for {flag}: {v}")))
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<ParsedArgs, ArgsError> {
    let mut it = args.into_iter();
    let prog = it.next().unwrap_or_else(|| "hwdash".into());
    let mut parsed = ParsedArgs::default();

    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Err(ArgsError::Help(format!("Usage: {prog} {USAGE_FLAGS}")));
            }
            "--host" | "-H" => {
                parsed.overrides.host = it.next();
            }
            "--port" | "-p" => {
                parsed.overrides.port = Some(parse_number("--port", it.next())?);
            }
            "--tick-ms" => {
                parsed.overrides.tick_ms = Some(parse_number("--tick-ms", it.next())?);
            }
            "--save" => parsed.save = true,
            "--dry-run" => parsed.dry_run = true,
            "--demo" => parsed.demo = true,
            _ if arg.starts_with("--host=") => {
                if let Some((_, v)) = arg.split_once('=') {
                    if !v.is_empty() {
                        parsed.overrides.host = Some(v.to_string());
                    }
                }
            }
            _ if arg.starts_with("--port=") => {
                let v = arg.split_once('=').map(|(_, v)| v.to_string());
                parsed.overrides.port = Some(parse_number("--port", v)?);
            }
            _ => {
                if parsed.url.is_none() {
                    parsed.url = Some(arg);
                } else {
                    return Err(ArgsError::Invalid(format!(
                        "Unexpected argument. Usage: {prog} {USAGE_FLAGS}"
                    )));
                }
            }
        }
    }
    Ok(parsed)
}

fn validate_url(raw: &str) -> Result<String, String> {
    let u = url::Url::parse(raw).map_err(|e| format!("invalid url {raw}: {e}"))?;
    match u.scheme() {
        "ws" | "wss" => Ok(u.to_string()),
        other => Err(format!("unsupported scheme {other}: expected ws:// or wss://")),
    }
}

// Logs go to a file so they never tear the alternate screen
fn init_logging() {
    let path = settings::log_path();
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let parsed = match parse_args(env::args()) {
        Ok(v) => v,
        Err(ArgsError::Help(usage)) => {
            eprintln!("{usage}");
            return Ok(());
        }
        Err(ArgsError::Invalid(msg)) => anyhow::bail!(msg),
    };
    init_logging();

    let settings = parsed.overrides.apply(load_settings());
    if parsed.save {
        if let Err(e) = save_settings(&settings) {
            eprintln!("could not save settings: {e}");
        }
    }

    if parsed.demo {
        return run_demo_mode(&settings).await;
    }

    let url = validate_url(&parsed.url.unwrap_or_else(|| settings.url())).map_err(anyhow::Error::msg)?;
    if parsed.dry_run {
        println!("{url}");
        return Ok(());
    }

    let mut app = App::new(&settings);
    app.run(&url).await
}

// --- Demo Mode ---

const DEMO_PORT: u16 = 3231;

async fn run_demo_mode(settings: &hwdash::settings::Settings) -> anyhow::Result<()> {
    let url = format!("ws://127.0.0.1:{DEMO_PORT}/ws");
    let child = spawn_demo_agent(DEMO_PORT)?;
    let mut app = App::new(settings);
    tokio::select! {
        res = app.run(&url) => { drop(child); res }
        _ = tokio::signal::ctrl_c() => {
            drop(child);
            Ok(())
        }
    }
}

struct DemoGuard(std::process::Child);
impl Drop for DemoGuard {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

fn spawn_demo_agent(port: u16) -> anyhow::Result<DemoGuard> {
    let mut cmd = std::process::Command::new(find_agent_executable());
    cmd.arg("--port").arg(port.to_string());
    cmd.env("HWDASH_AGENT_SMART", "0");
    let child = cmd.spawn()?;
    // Give the agent a brief moment to start
    std::thread::sleep(std::time::Duration::from_millis(300));
    Ok(DemoGuard(child))
}

fn find_agent_executable() -> std::path::PathBuf {
    if let Some(parent) = std::env::current_exe().ok().and_then(|e| e.parent().map(|p| p.to_path_buf())) {
        #[cfg(windows)]
        let name = "hwdash_agent.exe";
        #[cfg(not(windows))]
        let name = "hwdash_agent";
        let candidate = parent.join(name);
        if candidate.exists() {
            return candidate;
        }
    }
    // Fallback to relying on PATH
    std::path::PathBuf::from("hwdash_agent")
}

#[cfg(test)]
mod tests {
    use super::{parse_args, validate_url, ArgsError};

    fn args(v: &[&str]) -> Vec<String> {
        std::iter::once("hwdash").chain(v.iter().copied()).map(String::from).collect()
    }

    #[test]
    fn host_and_port_long_short_and_assign() {
        let p = parse_args(args(&["-H", "10.0.0.2", "--port=9000"])).unwrap();
        assert_eq!(p.overrides.host.as_deref(), Some("10.0.0.2"));
        assert_eq!(p.overrides.port, Some(9000));
        let p = parse_args(args(&["--host=box", "-p", "7000", "--tick-ms", "250"])).unwrap();
        assert_eq!(p.overrides.host.as_deref(), Some("box"));
        assert_eq!(p.overrides.port, Some(7000));
        assert_eq!(p.overrides.tick_ms, Some(250));
    }

    #[test]
    fn url_must_be_websocket() {
        assert_eq!(validate_url("ws://rig:7681/ws").unwrap(), "ws://rig:7681/ws");
        assert!(validate_url("http://rig:7681/ws").is_err());
        assert!(validate_url("not a url").is_err());
    }

    #[test]
    fn rejects_bad_port_and_extra_positional() {
        assert_eq!(
            parse_args(args(&["--port", "http"])).unwrap_err(),
            ArgsError::Invalid("invalid value for --port: http".into())
        );
        assert!(matches!(parse_args(args(&["--tick-ms"])), Err(ArgsError::Invalid(_))));
        assert!(matches!(parse_args(args(&["ws://a/ws", "ws://b/ws"])), Err(ArgsError::Invalid(_))));
        assert!(matches!(parse_args(args(&["-p", "1", "--help"])), Err(ArgsError::Help(_))));
        let p = parse_args(args(&["ws://a/ws"])).unwrap();
        assert_eq!(p.url.as_deref(), Some("ws://a/ws"));
    }
}
