use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

pub const JWT_SECRET: &str = "integration-test-secret";

pub struct ServerGuard {
    pub base_url: String,
    _data_dir: tempfile::TempDir,
    child: Child,
}

impl Drop for ServerGuard {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn spawn_server() -> Result<ServerGuard> {
    let data_dir = tempfile::tempdir().context("create server tempdir")?;
    let addr_file = data_dir.path().join("addr.txt");

    let child = spawn_server_process(data_dir.path(), &addr_file)?;
    let base_url = read_addr_file(&addr_file)?;
    wait_for_healthz(&base_url)?;

    Ok(ServerGuard {
        base_url,
        _data_dir: data_dir,
        child,
    })
}

pub fn spawn_server_process(
    data_dir: &std::path::Path,
    addr_file: &std::path::Path,
) -> Result<Child> {
    Command::new(env!("CARGO_BIN_EXE_taskdeck-server"))
        .args([
            "--addr",
            "127.0.0.1:0",
            "--addr-file",
            addr_file.to_str().unwrap(),
            "--data-dir",
            data_dir.to_str().unwrap(),
            "--jwt-secret",
            JWT_SECRET,
        ])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .context("spawn taskdeck-server")
}

pub fn read_addr_file(addr_file: &std::path::Path) -> Result<String> {
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("addr file not written at {}", addr_file.display());
        }

        if let Ok(s) = std::fs::read_to_string(addr_file) {
            let s = s.trim();
            if !s.is_empty() {
                return Ok(format!("http://{}", s));
            }
        }
        thread::sleep(Duration::from_millis(10));
    }
}

pub fn wait_for_healthz(base_url: &str) -> Result<()> {
    let client = reqwest::blocking::Client::new();
    let start = Instant::now();
    loop {
        if start.elapsed() > Duration::from_secs(5) {
            anyhow::bail!("server did not become healthy at {}/healthz", base_url);
        }
        match client.get(format!("{}/healthz", base_url)).send() {
            Ok(resp) if resp.status().is_success() => return Ok(()),
            _ => {
                thread::sleep(Duration::from_millis(50));
            }
        }
    }
}

#[allow(dead_code)]
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}

#[allow(dead_code)]
pub fn register(
    client: &reqwest::blocking::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<()> {
    client
        .post(format!("{}/auth/register", base_url))
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .context("register")?
        .error_for_status()
        .context("register status")?;
    Ok(())
}

/// Registers the user and returns the login access token.
#[allow(dead_code)]
pub fn register_and_login(
    client: &reqwest::blocking::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    register(client, base_url, username, password)?;
    login(client, base_url, username, password)
}

#[allow(dead_code)]
pub fn login(
    client: &reqwest::blocking::Client,
    base_url: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    let body: serde_json::Value = client
        .post(format!("{}/auth/login", base_url))
        .json(&serde_json::json!({"username": username, "password": password}))
        .send()
        .context("login")?
        .error_for_status()
        .context("login status")?
        .json()
        .context("parse login response")?;

    body.get("accessToken")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .context("accessToken missing")
}
