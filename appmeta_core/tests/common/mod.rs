//! Shared helpers: sample images and a minimal single-client FTP server.

#![allow(dead_code)]

use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Write an RGB gradient PNG (no alpha channel) of the given size
pub fn write_rgb_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    });
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png)
        .expect("write test png");
    path
}

/// Write a half-transparent RGBA PNG
pub fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 128]));
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Png)
        .expect("write test png");
    path
}

pub fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_pixel(width, height, Rgb([90, 60, 30]));
    let path = dir.join(name);
    img.save_with_format(&path, ImageFormat::Jpeg)
        .expect("write test jpeg");
    path
}

#[derive(Debug, Clone)]
pub struct StoredFile {
    pub dir: String,
    pub name: String,
    pub bytes: Vec<u8>,
}

/// What the fake server observed during the session
#[derive(Debug, Default)]
pub struct ServerLog {
    pub commands: Vec<String>,
    pub stored: Vec<StoredFile>,
    pub quit: bool,
}

impl ServerLog {
    pub fn command_names(&self) -> Vec<String> {
        self.commands
            .iter()
            .map(|c| c.split(' ').next().unwrap_or_default().to_ascii_uppercase())
            .collect()
    }

    pub fn count(&self, name: &str) -> usize {
        self.command_names().iter().filter(|c| *c == name).count()
    }
}

pub struct FakeFtpServer {
    pub addr: SocketAddr,
    pub log: Arc<Mutex<ServerLog>>,
    handle: Option<JoinHandle<()>>,
}

impl FakeFtpServer {
    /// Serve exactly one client. Only directories in `dirs` can be entered.
    pub fn start(dirs: &[&str]) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind fake ftp");
        let addr = listener.local_addr().unwrap();
        let dirs: Vec<String> = dirs.iter().map(|d| d.to_string()).collect();
        let log = Arc::new(Mutex::new(ServerLog::default()));

        let server_log = log.clone();
        let handle = thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                let _ = serve(stream, &dirs, &server_log);
            }
        });

        Self {
            addr,
            log,
            handle: Some(handle),
        }
    }

    pub fn port(&self) -> String {
        self.addr.port().to_string()
    }

    /// Wait for the client session to end and return the log
    pub fn finish(mut self) -> ServerLog {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("fake ftp thread panicked");
        }
        std::mem::take(&mut *self.log.lock().unwrap())
    }
}

fn reply(stream: &mut TcpStream, line: &str) -> std::io::Result<()> {
    stream.write_all(format!("{}\r\n", line).as_bytes())?;
    stream.flush()
}

fn serve(stream: TcpStream, dirs: &[String], log: &Mutex<ServerLog>) -> std::io::Result<()> {
    let mut writer = stream.try_clone()?;
    let mut reader = BufReader::new(stream);
    let mut cwd = "/".to_string();
    let mut passive: Option<TcpListener> = None;

    reply(&mut writer, "220 fake console ftp ready")?;

    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        let command = line.trim_end().to_string();
        log.lock().unwrap().commands.push(command.clone());

        let (verb, arg) = match command.split_once(' ') {
            Some((verb, arg)) => (verb.to_ascii_uppercase(), arg.to_string()),
            None => (command.to_ascii_uppercase(), String::new()),
        };

        match verb.as_str() {
            "USER" => reply(&mut writer, "331 password required")?,
            "PASS" => reply(&mut writer, "230 logged in")?,
            "TYPE" => reply(&mut writer, "200 type set")?,
            "CWD" => {
                if dirs.iter().any(|d| *d == arg) {
                    cwd = arg;
                    reply(&mut writer, "250 directory changed")?;
                } else {
                    reply(&mut writer, "550 no such directory")?;
                }
            }
            "PASV" => {
                let data = TcpListener::bind("127.0.0.1:0")?;
                let port = data.local_addr()?.port();
                passive = Some(data);
                reply(
                    &mut writer,
                    &format!(
                        "227 Entering Passive Mode (127,0,0,1,{},{})",
                        port >> 8,
                        port & 0xff
                    ),
                )?;
            }
            "STOR" => match passive.take() {
                Some(data) => {
                    let (mut conn, _) = data.accept()?;
                    reply(&mut writer, "150 opening data connection")?;
                    let mut bytes = Vec::new();
                    conn.read_to_end(&mut bytes)?;
                    log.lock().unwrap().stored.push(StoredFile {
                        dir: cwd.clone(),
                        name: arg,
                        bytes,
                    });
                    reply(&mut writer, "226 transfer complete")?;
                }
                None => reply(&mut writer, "425 use PASV first")?,
            },
            "QUIT" => {
                log.lock().unwrap().quit = true;
                reply(&mut writer, "221 bye")?;
                break;
            }
            _ => reply(&mut writer, "502 command not implemented")?,
        }
    }
    Ok(())
}

/// Calls observed by [`MockConnector`] and its sessions
#[derive(Debug, Default)]
pub struct MockLog {
    pub connects: Vec<(String, u16)>,
    pub calls: Vec<String>,
    pub stored: Vec<(String, Vec<u8>)>,
}

/// In-memory connector with scripted failures
#[derive(Debug, Clone, Default)]
pub struct MockConnector {
    pub log: Arc<Mutex<MockLog>>,
    pub refuse_connect: bool,
    pub reject_login: bool,
    pub missing_dir: bool,
    /// Fail the store of the file at this index
    pub fail_store_at: Option<usize>,
}

impl MockConnector {
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn connect_count(&self) -> usize {
        self.log.lock().unwrap().connects.len()
    }

    pub fn stored(&self) -> Vec<(String, Vec<u8>)> {
        self.log.lock().unwrap().stored.clone()
    }
}

pub struct MockSession {
    connector: MockConnector,
    stores: usize,
}

impl appmeta_core::transfer::Connector for MockConnector {
    type Session = MockSession;

    fn connect(
        &self,
        host: &str,
        port: u16,
        _timeout: std::time::Duration,
    ) -> anyhow::Result<MockSession> {
        self.log
            .lock()
            .unwrap()
            .connects
            .push((host.to_string(), port));
        if self.refuse_connect {
            anyhow::bail!("connection refused");
        }
        Ok(MockSession {
            connector: self.clone(),
            stores: 0,
        })
    }
}

impl MockSession {
    fn record(&self, call: String) {
        self.connector.log.lock().unwrap().calls.push(call);
    }
}

impl appmeta_core::transfer::RemoteSession for MockSession {
    fn login_anonymous(&mut self) -> anyhow::Result<()> {
        self.record("LOGIN".to_string());
        if self.connector.reject_login {
            anyhow::bail!("530 login incorrect");
        }
        Ok(())
    }

    fn change_dir(&mut self, path: &str) -> anyhow::Result<()> {
        self.record(format!("CWD {}", path));
        if self.connector.missing_dir {
            anyhow::bail!("550 no such directory");
        }
        Ok(())
    }

    fn store(&mut self, file_name: &str, reader: &mut dyn Read) -> anyhow::Result<u64> {
        self.record(format!("STOR {}", file_name));
        let index = self.stores;
        self.stores += 1;
        if self.connector.fail_store_at == Some(index) {
            anyhow::bail!("451 local error in processing");
        }
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        let len = bytes.len() as u64;
        self.connector
            .log
            .lock()
            .unwrap()
            .stored
            .push((file_name.to_string(), bytes));
        Ok(len)
    }

    fn close(&mut self) -> anyhow::Result<()> {
        self.record("QUIT".to_string());
        Ok(())
    }
}
