//! Named-pipe transport between the CLI and the daemon.
//!
//! Every exchange is one JSON line from the client followed by one JSON
//! line back from the daemon.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use overlay_core::WindowResult;
use overlay_core::ipc::{Command, PIPE_NAME, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, ERROR_PIPE_CONNECTED, HANDLE,
    INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

const GENERIC_READ_WRITE: u32 = 0x8000_0000 | 0x4000_0000;
const PIPE_BUFFER_SIZE: u32 = 4096;

/// Owned pipe handle, closed on drop.
struct PipeHandle(HANDLE);

impl Drop for PipeHandle {
    fn drop(&mut self) {
        // SAFETY: the handle is owned exclusively by this guard.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// One end of a connected pipe, speaking newline-delimited JSON.
struct Connection {
    reader: BufReader<File>,
    writer: File,
}

impl Connection {
    fn over(handle: HANDLE) -> WindowResult<Self> {
        Ok(Self {
            reader: BufReader::new(file_for(handle)?),
            writer: file_for(handle)?,
        })
    }

    fn send<T: Serialize>(&mut self, message: &T) -> WindowResult<()> {
        let json = serde_json::to_string(message)?;
        writeln!(self.writer, "{json}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn receive<T: DeserializeOwned>(&mut self) -> WindowResult<T> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err("pipe closed before a message arrived".into());
        }
        Ok(serde_json::from_str(line.trim())?)
    }
}

/// Wraps a duplicate of `handle` as a `File` so reader, writer, and the
/// pipe itself can each be closed independently.
fn file_for(handle: HANDLE) -> WindowResult<File> {
    let mut dup = HANDLE::default();
    // SAFETY: the duplicate is owned by the returned File.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )?;
        Ok(File::from_raw_handle(dup.0))
    }
}

/// The daemon's end of the pipe. Serves one client at a time.
pub struct PipeServer {
    pipe: PipeHandle,
}

impl PipeServer {
    /// Creates the single pipe instance.
    ///
    /// Fails if another daemon already owns the pipe name.
    pub fn create() -> WindowResult<Self> {
        // SAFETY: valid parameters; the result is checked below.
        let handle = unsafe {
            CreateNamedPipeW(
                &HSTRING::from(PIPE_NAME),
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                1,
                PIPE_BUFFER_SIZE,
                PIPE_BUFFER_SIZE,
                0,
                None,
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err("could not create the daemon pipe (another instance running?)".into());
        }
        Ok(Self {
            pipe: PipeHandle(handle),
        })
    }

    /// Blocks until a client connects and returns its command.
    ///
    /// On a malformed request the client is disconnected before the error
    /// is returned, so the pipe is ready for the next client.
    pub fn accept_command(&self) -> WindowResult<Command> {
        // SAFETY: blocks until a client connects to this instance.
        if let Err(e) = unsafe { ConnectNamedPipe(self.pipe.0, None) } {
            // A client that connected before the wait is still a client.
            if e.code() != ERROR_PIPE_CONNECTED.to_hresult() {
                self.disconnect();
                return Err(e.into());
            }
        }

        let received = Connection::over(self.pipe.0).and_then(|mut c| c.receive());
        if received.is_err() {
            self.disconnect();
        }
        received
    }

    /// Answers the connected client and disconnects it.
    pub fn send_response(&self, response: &Response) -> WindowResult<()> {
        let sent = Connection::over(self.pipe.0).and_then(|mut c| c.send(response));
        self.disconnect();
        sent
    }

    fn disconnect(&self) {
        // SAFETY: FlushFileBuffers waits until the client read everything;
        // disconnecting first would discard the unread response.
        unsafe {
            let _ = FlushFileBuffers(self.pipe.0);
            let _ = DisconnectNamedPipe(self.pipe.0);
        }
    }
}

/// Sends one command to the running daemon and waits for its answer.
pub fn send_command(command: &Command) -> WindowResult<Response> {
    // SAFETY: opens the existing pipe as a client; closed by the guard.
    let pipe = PipeHandle(unsafe {
        CreateFileW(
            &HSTRING::from(PIPE_NAME),
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )?
    });

    let mut connection = Connection::over(pipe.0)?;
    connection.send(command)?;
    connection.receive()
}

/// Whether a daemon is listening on the pipe.
///
/// Checks with a 1 ms wait so no connection is consumed.
pub fn is_daemon_running() -> bool {
    // SAFETY: only checks whether the pipe name exists.
    unsafe { WaitNamedPipeW(&HSTRING::from(PIPE_NAME), 1).as_bool() }
}
