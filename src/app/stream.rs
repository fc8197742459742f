//! Line-delimited JSON processing of deposit requests.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, warn};

use crate::app::service::CreditService;
use crate::domain::{AppError, CreditReport, DepositRequest};

/// Decode one input line.
///
/// Returns `None` for blank lines and for lines that are not a valid
/// request, including lines that are not UTF-8.
#[must_use]
pub fn parse_request_line(line: &[u8]) -> Option<DepositRequest> {
    if line.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    match serde_json::from_slice(line) {
        Ok(request) => Some(request),
        Err(e) => {
            warn!(error = %e, "Skipping malformed request");
            None
        }
    }
}

/// Read requests from `reader` until EOF and write one JSON report per line
/// to `writer`. Returns the number of reports written.
///
/// Malformed lines are skipped. I/O failures and currency policy errors end
/// the stream.
pub async fn process_requests<R, W>(
    service: &CreditService,
    mut reader: R,
    mut writer: W,
) -> Result<usize, AppError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut processed = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to read input: {}", e)))?;
        if read == 0 {
            break;
        }

        let Some(request) = parse_request_line(&buf) else {
            continue;
        };

        let report: CreditReport = service.deposit(&request).await?;
        let mut out = serde_json::to_vec(&report)?;
        out.push(b'\n');
        writer
            .write_all(&out)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write report: {}", e)))?;
        processed += 1;
    }

    writer
        .flush()
        .await
        .map_err(|e| AppError::Internal(format!("Failed to flush output: {}", e)))?;
    debug!(processed, "Input exhausted");
    Ok(processed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::test_utils::{MockAccountFactory, MockCurrencyExchange};

    fn service(exchange: MockCurrencyExchange) -> CreditService {
        CreditService::new(Arc::new(MockAccountFactory::new()), Arc::new(exchange))
    }

    fn account_line(currency: &str) -> String {
        format!(
            "{{\"account_id\": \"{}\", \"amount\": \"10.00\", \"currency\": \"{}\"}}\n",
            uuid::Uuid::new_v4(),
            currency
        )
    }

    fn reports(output: &[u8]) -> Vec<serde_json::Value> {
        output
            .split(|b| *b == b'\n')
            .filter(|line| !line.is_empty())
            .map(|line| serde_json::from_slice(line).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_request_line() {
        assert!(parse_request_line(b"").is_none());
        assert!(parse_request_line(b"  \r\n").is_none());
        assert!(parse_request_line(b"\xff\xfe garbage\n").is_none());
        assert!(parse_request_line(b"{\"amount\": 1}\n").is_none());

        let request = parse_request_line(account_line("USD").as_bytes()).unwrap();
        assert_eq!(request.currency, "USD");
    }

    #[tokio::test]
    async fn test_non_utf8_line_is_skipped() {
        let service = service(MockCurrencyExchange::new());
        let mut input = account_line("USD").into_bytes();
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(account_line("EUR").as_bytes());

        let mut output = Vec::new();
        let processed = process_requests(&service, &input[..], &mut output)
            .await
            .unwrap();

        assert_eq!(processed, 2);
        let reports = reports(&output);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["outcome"]["amount"]["currency"], "USD");
        assert_eq!(reports[1]["outcome"]["amount"]["currency"], "EUR");
    }

    #[tokio::test]
    async fn test_last_line_without_newline_and_blank_lines() {
        let service = service(MockCurrencyExchange::new());
        let mut input = b"\n\n".to_vec();
        input.extend_from_slice(account_line("GBP").trim_end().as_bytes());

        let mut output = Vec::new();
        let processed = process_requests(&service, &input[..], &mut output)
            .await
            .unwrap();

        assert_eq!(processed, 1);
        assert_eq!(reports(&output)[0]["outcome"]["status"], "created");
    }

    #[tokio::test]
    async fn test_policy_error_ends_stream() {
        let service = service(MockCurrencyExchange::failing("down"));
        let input = account_line("USD").into_bytes();

        let mut output = Vec::new();
        let result = process_requests(&service, &input[..], &mut output).await;

        assert!(matches!(result, Err(AppError::ExternalService(_))));
        assert!(output.is_empty());
    }
}
