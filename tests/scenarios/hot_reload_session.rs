//! Scenario: Hot Reload While Designing
//!
//! Journey: an app in development attaches to `swatch serve` and follows
//! design edits without restarting.
//!
//! Steps:
//! 1. `swatch serve` builds the design and listens
//! 2. The app attaches for its target and receives the current snapshot
//! 3. The designer edits the dump; the app receives the next sequence
//! 4. A broken dump leaves the app on the last good snapshot

use std::io::{BufRead, BufReader, Write};
use std::net::{TcpListener, TcpStream};
use std::process::Child;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::Value;

use crate::common::*;

/// Kills the server when the test ends, passing or not
struct Server(Child);

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.0.kill();
        let _ = self.0.wait();
    }
}

struct App {
    reader: BufReader<TcpStream>,
    writer: TcpStream,
}

impl App {
    fn attach(addr: &str, target: &str) -> Self {
        let deadline = Instant::now() + Duration::from_secs(20);
        let stream = loop {
            match TcpStream::connect(addr) {
                Ok(stream) => break stream,
                Err(_) if Instant::now() < deadline => thread::sleep(Duration::from_millis(100)),
                Err(e) => panic!("server never listened on {}: {}", addr, e),
            }
        };
        stream
            .set_read_timeout(Some(Duration::from_secs(20)))
            .unwrap();
        let mut writer = stream.try_clone().unwrap();
        writeln!(writer, "attach {}", target).unwrap();
        Self {
            reader: BufReader::new(stream),
            writer,
        }
    }

    /// Next snapshot, acknowledged
    fn receive(&mut self) -> Value {
        let mut line = String::new();
        self.reader.read_line(&mut line).expect("snapshot line");
        let snapshot: Value = serde_json::from_str(line.trim()).expect("snapshot JSON");
        writeln!(self.writer, "ack {}", snapshot["sequence"]).unwrap();
        snapshot
    }
}

fn free_addr() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().to_string()
}

#[test]
fn scenario_app_follows_design_edits() {
    let env = TestEnv::with_design();
    let addr = free_addr();
    let _server = Server(env.spawn(&[
        "serve",
        "--dump",
        "design.json",
        "--targets",
        "web",
        "--addr",
        &addr,
    ]));

    let mut app = App::attach(&addr, "web");
    let first = app.receive();
    assert_eq!(first["target"], "web");
    assert_eq!(first["component"], "PoodleSurf");
    assert_eq!(first["sequence"], 1);

    // Broken dump: no snapshot, the next good edit continues the sequence
    env.write_project_file("design.json", "{ not json");
    thread::sleep(Duration::from_millis(600));
    env.write_project_file("design.json", &design_with_sand("#000000"));

    let second = app.receive();
    assert_eq!(second["sequence"], 2);
    assert_ne!(second["state"]["colors"]["sand"], first["state"]["colors"]["sand"]);
    assert_eq!(second["state"]["colors"]["oceanBlue"], first["state"]["colors"]["oceanBlue"]);

    assert!(env.project_path("build/web/src/PoodleSurf.ts").is_file());
}

#[test]
fn scenario_unknown_target_is_refused() {
    let env = TestEnv::with_design();
    let addr = free_addr();
    let _server = Server(env.spawn(&["serve", "--dump", "design.json", "--addr", &addr, "--no-publish"]));

    let mut app = App::attach(&addr, "desktop");
    let mut line = String::new();
    let read = app.reader.read_line(&mut line).unwrap_or(0);

    assert_eq!(read, 0, "expected the connection to close, got {:?}", line);
    assert!(!env.project_path("build").exists());
}
