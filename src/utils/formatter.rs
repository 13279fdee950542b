// Formatters - 파일 크기, 상대 시간 포맷팅

use chrono::{DateTime, SecondsFormat, Utc};

/// 크기를 표시할 수 없을 때 사용하는 표식
pub const SIZE_ERROR_MARKER: &str = "ERROR";

const SIZE_UNITS: [&str; 5] = ["B", "kiB", "MiB", "GiB", "TiB"];

/// 파일 크기를 1024 단위로 포맷팅 (항상 소수점 두 자리)
///
/// 크기가 없으면 `ERROR` 표식을 반환합니다.
///
/// # Examples
/// ```ignore
/// use hostpick::utils::formatter::humanize_size;
///
/// assert_eq!(humanize_size(Some(0)), "0.00 B");
/// assert_eq!(humanize_size(Some(1024)), "1.00 kiB");
/// assert_eq!(humanize_size(None), "ERROR");
/// ```
pub fn humanize_size(size: Option<u64>) -> String {
    let Some(bytes) = size else {
        return SIZE_ERROR_MARKER.to_string();
    };

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    // 반올림하면 1024가 되는 값은 다음 단위로 올린다
    if (value * 100.0).round() >= 102_400.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", value, SIZE_UNITS[unit])
}

/// 기준 시각 대비 대략적인 경과 시간 표시
///
/// 시계를 직접 읽지 않으므로 같은 입력에는 항상 같은 결과가 나옵니다.
/// 대상이 기준보다 미래이면 대상의 절대 시각(ISO-8601, 밀리초)을 반환합니다.
pub fn relative_duration(target: DateTime<Utc>, reference: DateTime<Utc>) -> String {
    let elapsed_ms = (reference - target).num_milliseconds();
    if elapsed_ms < 0 {
        return target.to_rfc3339_opts(SecondsFormat::Millis, true);
    }

    let seconds = elapsed_ms as f64 / 1000.0;
    if seconds < 5.0 {
        return "now".to_string();
    }
    if seconds < 60.0 {
        return "seconds ago".to_string();
    }
    if seconds < 3600.0 {
        return format!("{}min ago", (seconds / 60.0).round() as i64);
    }
    if seconds < 86_400.0 {
        return format!("{}h ago", (seconds / 3600.0).round() as i64);
    }

    let days = (seconds / 86_400.0).round() as i64;
    if days == 1 {
        "yesterday".to_string()
    } else {
        format!("{} days ago", days)
    }
}
