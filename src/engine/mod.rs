use std::process::Stdio;
use std::time::Duration;

use anyhow::{bail, Context};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin, ChildStdout, Command};
use tokio::time::timeout;

/// How long a handshake exchange may take before the engine is
/// declared unreachable.
const HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(5);
/// Slack on top of the per-move budget before a search is declared
/// lost. The engine is expected to honor `movetime` itself.
const REPLY_GRACE: Duration = Duration::from_secs(5);
/// How long a quitting engine gets before it is killed.
const QUIT_TIMEOUT: Duration = Duration::from_secs(2);

/// A UCI search engine running as a child process. Holds the pipes
/// for the line-oriented request/response protocol; never sees the
/// board itself, only FEN snapshots.
pub struct UciEngine {
    child: Child,
    stdin: ChildStdin,
    reader: BufReader<ChildStdout>,
}

impl UciEngine {
    /// Launches the engine binary and brings it to a playable state:
    /// UCI handshake, strength option, readiness probe. Any failure
    /// here means the session must not start.
    pub async fn spawn(path: &str, skill_level: u8) -> anyhow::Result<Self> {
        Self::spawn_with(Command::new(path), skill_level)
            .await
            .with_context(|| format!("failed to start engine at '{}'", path))
    }

    async fn spawn_with(mut command: Command, skill_level: u8) -> anyhow::Result<Self> {
        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .context("could not launch engine process")?;

        let stdin = child.stdin.take().context("engine stdin unavailable")?;
        let stdout = child.stdout.take().context("engine stdout unavailable")?;
        let mut engine = UciEngine {
            child,
            stdin,
            reader: BufReader::new(stdout),
        };

        engine.send("uci").await?;
        engine.wait_for("uciok", HANDSHAKE_TIMEOUT).await?;
        engine
            .send(&format!("setoption name Skill Level value {}", skill_level))
            .await?;
        engine.send("ucinewgame").await?;
        engine.send("isready").await?;
        engine.wait_for("readyok", HANDSHAKE_TIMEOUT).await?;
        Ok(engine)
    }

    /// One search request: position in, exactly one move out. An
    /// empty reply ("bestmove (none)"), EOF or a timeout is an
    /// adapter failure; the caller decides what to do with the board.
    pub async fn bestmove(&mut self, fen: &str, budget: Duration) -> anyhow::Result<String> {
        self.send(&format!("position fen {}", fen)).await?;
        self.send(&format!("go movetime {}", budget.as_millis()))
            .await?;

        let reply = timeout(budget + REPLY_GRACE, async {
            loop {
                let line = self.read_line().await?;
                if let Some(rest) = line.strip_prefix("bestmove") {
                    let token = rest.split_whitespace().next().unwrap_or_default();
                    return Ok::<String, anyhow::Error>(token.to_string());
                }
            }
        })
        .await
        .context("engine did not produce a move in time")??;

        if reply.is_empty() || reply == "(none)" {
            bail!("engine returned no move");
        }
        Ok(reply)
    }

    /// Releases the engine process: asks politely, kills on overrun.
    pub async fn quit(mut self) -> anyhow::Result<()> {
        let _ = self.send("quit").await;
        if timeout(QUIT_TIMEOUT, self.child.wait()).await.is_err() {
            self.child
                .kill()
                .await
                .context("failed to kill engine process")?;
        }
        Ok(())
    }

    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        self.stdin
            .write_all(line.as_bytes())
            .await
            .context("engine stdin closed")?;
        self.stdin.write_all(b"\n").await.context("engine stdin closed")?;
        self.stdin.flush().await.context("engine stdin closed")?;
        Ok(())
    }

    async fn read_line(&mut self) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .await
            .context("engine stdout read failed")?;
        if n == 0 {
            bail!("engine closed its output stream");
        }
        Ok(line.trim().to_string())
    }

    async fn wait_for(&mut self, token: &str, budget: Duration) -> anyhow::Result<()> {
        timeout(budget, async {
            loop {
                let line = self.read_line().await?;
                if line == token {
                    return Ok(());
                }
            }
        })
        .await
        .with_context(|| format!("engine did not answer '{}' in time", token))?
    }
}
