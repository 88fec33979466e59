//! Line reader delivering commands to the scheduler

use std::borrow::Cow;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, BufReader};
use tracing::{debug, warn};

use crate::scheduler::CookScheduler;

/// Longest accepted line in bytes, terminator included
pub const MAX_LINE_LEN: usize = 256;

/// Read lines from `reader` until EOF, handing each one to the scheduler.
///
/// Every line is independent: invalid UTF-8 is decoded lossily and lines
/// longer than [`MAX_LINE_LEN`] are discarded, neither ends the stream.
/// Blank lines are skipped. Returns the number of commands delivered.
pub async fn serve_lines<R>(reader: R, scheduler: &CookScheduler) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::with_capacity(MAX_LINE_LEN);
    let mut delivered = 0;

    loop {
        buf.clear();
        let read = read_bounded_line(&mut reader, &mut buf).await?;
        if read == 0 {
            break;
        }

        if read == MAX_LINE_LEN && !buf.ends_with(b"\n") {
            warn!("Discarding line longer than {} bytes", MAX_LINE_LEN);
            discard_rest_of_line(&mut reader, &mut buf).await?;
            continue;
        }

        let line = String::from_utf8_lossy(&buf);
        if matches!(line, Cow::Owned(_)) {
            warn!("Line is not valid UTF-8, decoding lossily");
        }
        if line.trim().is_empty() {
            debug!("Skipping blank line");
            continue;
        }

        scheduler.handle(&line);
        delivered += 1;
    }

    Ok(delivered)
}

/// Read up to [`MAX_LINE_LEN`] bytes, stopping after a newline
async fn read_bounded_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    (&mut *reader)
        .take(MAX_LINE_LEN as u64)
        .read_until(b'\n', buf)
        .await
}

async fn discard_rest_of_line<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        buf.clear();
        let read = read_bounded_line(reader, buf).await?;
        if read == 0 || buf.ends_with(b"\n") {
            return Ok(());
        }
    }
}
