// Timers - 이벤트 루프에서 구동하는 취소 가능한 타이머
//
// 스레드나 콜백 없이 Instant 비교만으로 동작한다.
// 호출자가 매 루프마다 현재 시각을 넘겨 `poll` 해야 한다.

use std::time::{Duration, Instant};

/// 한 번만 발화하는 지연 타이머 (디바운스)
#[derive(Debug, Clone, Default)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// `now + delay` 시점으로 (재)예약
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.due = None;
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    /// 만기 시 true를 한 번만 반환하고 스스로 해제된다.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// 주기 타이머
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    /// 주기가 지났으면 true. 여러 주기가 밀렸어도 한 번만 발화한다.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(next) if now >= next => {
                let mut upcoming = next + self.period;
                while upcoming <= now {
                    upcoming += self.period;
                }
                self.next = Some(upcoming);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deadline_fires_once() {
        let t0 = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(t0, Duration::from_millis(300));

        assert!(!deadline.poll(t0 + Duration::from_millis(299)));
        assert!(deadline.poll(t0 + Duration::from_millis(300)));
        assert!(!deadline.poll(t0 + Duration::from_millis(900)));
        assert!(!deadline.is_pending());
    }

    #[test]
    fn test_deadline_cancel() {
        let t0 = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(t0, Duration::from_millis(300));
        deadline.cancel();

        assert!(!deadline.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_interval_coalesces_missed_ticks() {
        let t0 = Instant::now();
        let mut interval = Interval::new(Duration::from_secs(60));
        assert!(!interval.poll(t0 + Duration::from_secs(120)));

        interval.start(t0);
        assert!(!interval.poll(t0 + Duration::from_secs(59)));
        assert!(interval.poll(t0 + Duration::from_secs(200)));
        // 다음 발화는 240초
        assert!(!interval.poll(t0 + Duration::from_secs(239)));
        assert!(interval.poll(t0 + Duration::from_secs(240)));

        interval.stop();
        assert!(!interval.poll(t0 + Duration::from_secs(1000)));
    }
}
