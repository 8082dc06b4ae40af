// src/application/dto/parser.rs
// Parsers for DTOs

use super::CandlePayload;
use crate::domain::errors::{MarketDataError, MarketDataResult};
use crate::domain::model::{Candle, CandleResponse};

/// Parse a candle provider body. Any status other than `ok` is "no data".
pub fn parse_candle_payload(body: &str) -> MarketDataResult<CandleResponse> {
    let payload: CandlePayload =
        serde_json::from_str(body).map_err(|e| MarketDataError::Parse(e.to_string()))?;

    if payload.status != "ok" {
        return Ok(CandleResponse::no_data());
    }

    let len = payload.timestamps.len();
    let columns = [
        ("o", payload.open.len()),
        ("h", payload.high.len()),
        ("l", payload.low.len()),
        ("c", payload.close.len()),
        ("v", payload.volume.len()),
    ];
    if let Some((name, column_len)) = columns.iter().find(|(_, l)| *l != len) {
        return Err(MarketDataError::InvalidFormat(format!(
            "Column {} has {} values, expected {}",
            name, column_len, len
        )));
    }

    let candles = (0..len)
        .map(|i| Candle {
            timestamp: payload.timestamps[i],
            open: payload.open[i],
            high: payload.high[i],
            low: payload.low[i],
            close: payload.close[i],
            volume: payload.volume[i],
        })
        .collect();

    Ok(CandleResponse::ok(candles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::CandleStatus;

    #[test]
    fn parses_ok_payload() {
        let body = r#"{"s":"ok","t":[1,2],"o":[1.0,2.0],"h":[1.5,2.5],"l":[0.5,1.5],"c":[1.2,2.2],"v":[100,200]}"#;
        let response = parse_candle_payload(body).unwrap();

        assert_eq!(response.status, CandleStatus::Ok);
        assert_eq!(response.candles.len(), 2);
        assert_eq!(response.candles[1].timestamp, 2);
        assert_eq!(response.candles[1].close, 2.2);
        assert_eq!(response.candles[1].volume, 200.0);
    }

    #[test]
    fn no_data_status() {
        let response = parse_candle_payload(r#"{"s":"no_data"}"#).unwrap();

        assert_eq!(response.status, CandleStatus::Error);
        assert!(response.candles.is_empty());
    }

    #[test]
    fn ragged_columns_are_invalid() {
        let body = r#"{"s":"ok","t":[1,2],"o":[1.0],"h":[1.5,2.5],"l":[0.5,1.5],"c":[1.2,2.2],"v":[100,200]}"#;
        assert!(matches!(
            parse_candle_payload(body),
            Err(MarketDataError::InvalidFormat(_))
        ));
    }

    #[test]
    fn garbage_is_a_parse_error() {
        assert!(matches!(
            parse_candle_payload("<html>"),
            Err(MarketDataError::Parse(_))
        ));
    }
}
