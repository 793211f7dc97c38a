//! TCP hot-reload transport
//!
//! Protocol, one line per message:
//!
//! ```text
//! client: attach web
//! server: {"sequence":1,"target":"web","component":"Root","state":{...}}
//! client: ack 1
//! ```
//!
//! Acknowledging a later sequence also acknowledges earlier ones.

use std::io::{self, BufRead, BufReader, ErrorKind, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::application::hot_reload::HotReloadServer;
use crate::domain::entities::Snapshot;
use crate::domain::ports::SnapshotTransport;
use crate::domain::value_objects::Target;

/// Time a new connection has to send its `attach` line
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);

const ACCEPT_INTERVAL: Duration = Duration::from_millis(50);

/// One connected runtime
pub struct TcpTransport {
    writer: TcpStream,
    reader: BufReader<TcpStream>,
    peer: String,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        let peer = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "tcp".to_string());
        let reader = BufReader::new(stream.try_clone()?);
        Ok(Self {
            writer: stream,
            reader,
            peer,
        })
    }

    /// Read the `attach <target>` line
    pub fn handshake(&mut self) -> io::Result<Target> {
        self.writer.set_read_timeout(Some(HANDSHAKE_TIMEOUT))?;
        let line = self.read_line()?;
        let target = line
            .strip_prefix("attach ")
            .and_then(|t| Target::parse_loose(t.trim()));
        target.ok_or_else(|| {
            io::Error::new(
                ErrorKind::InvalidData,
                format!("expected 'attach <target>', got '{}'", line.trim()),
            )
        })
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(io::Error::new(ErrorKind::UnexpectedEof, "connection closed")),
            Ok(_) => Ok(line),
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Err(io::Error::new(ErrorKind::TimedOut, "acknowledgement timed out"))
            }
            Err(err) => Err(err),
        }
    }
}

impl SnapshotTransport for TcpTransport {
    fn deliver(&mut self, snapshot: &Snapshot, timeout: Duration) -> io::Result<()> {
        let wire = snapshot.to_wire()?;
        self.writer.write_all(wire.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.writer
            .set_read_timeout(Some(timeout.max(Duration::from_millis(1))))?;
        loop {
            let line = self.read_line()?;
            match parse_ack(&line) {
                Some(sequence) if sequence >= snapshot.sequence() => return Ok(()),
                Some(_) => continue,
                None => debug!(peer = %self.peer, "ignoring line: {}", line.trim()),
            }
        }
    }

    fn close(&mut self) {
        let _ = self.writer.shutdown(std::net::Shutdown::Both);
    }

    fn describe(&self) -> String {
        self.peer.clone()
    }
}

fn parse_ack(line: &str) -> Option<u64> {
    line.trim().strip_prefix("ack ")?.trim().parse().ok()
}

/// Accepts runtimes and attaches them to a server
pub struct TcpSnapshotListener {
    listener: TcpListener,
}

impl TcpSnapshotListener {
    pub fn bind(addr: impl ToSocketAddrs) -> io::Result<Self> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(Self { listener })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections on a background thread until `running` clears
    pub fn spawn(
        self,
        server: HotReloadServer,
        running: Arc<AtomicBool>,
    ) -> io::Result<JoinHandle<()>> {
        if let Ok(addr) = self.local_addr() {
            info!(%addr, "hot-reload listener ready");
        }
        thread::Builder::new()
            .name("swatch-listener".to_string())
            .spawn(move || self.accept_loop(&server, &running))
    }

    fn accept_loop(&self, server: &HotReloadServer, running: &AtomicBool) {
        while running.load(Ordering::SeqCst) {
            match self.listener.accept() {
                Ok((stream, addr)) => {
                    // A runtime that is slow to send its handshake only holds up itself
                    let server = server.clone();
                    let spawned = thread::Builder::new()
                        .name(format!("swatch-handshake-{}", addr))
                        .spawn(move || {
                            if let Err(err) = attach(&server, stream) {
                                warn!(%addr, "rejected client: {}", err);
                            }
                        });
                    if let Err(err) = spawned {
                        warn!(%addr, "could not start handshake: {}", err);
                    }
                }
                Err(err) if err.kind() == ErrorKind::WouldBlock => thread::sleep(ACCEPT_INTERVAL),
                Err(err) => {
                    warn!("accept failed: {}", err);
                    thread::sleep(ACCEPT_INTERVAL);
                }
            }
        }
    }
}

fn attach(server: &HotReloadServer, stream: TcpStream) -> io::Result<()> {
    stream.set_nonblocking(false)?;
    stream.set_nodelay(true)?;
    let mut transport = TcpTransport::new(stream)?;
    let target = transport.handshake()?;
    server.attach(target, Box::new(transport));
    Ok(())
}
