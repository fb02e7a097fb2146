//! Cooperative single-threaded scheduler.
//!
//! Handlers are registered against a context type and run either on every
//! tick or once per period. Time comes from a [`Clock`] so tests can drive
//! it by hand.

use anyhow::Result;
use std::time::{Duration, Instant};

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

pub type Handler<Ctx> = fn(&mut Ctx) -> Result<()>;

struct Task<Ctx> {
    name: &'static str,
    /// `None` runs every tick
    period: Option<Duration>,
    last_run: Option<Instant>,
    handler: Handler<Ctx>,
}

impl<Ctx> Task<Ctx> {
    fn is_due(&self, now: Instant) -> bool {
        match (self.period, self.last_run) {
            (None, _) | (Some(_), None) => true,
            (Some(period), Some(last)) => now.saturating_duration_since(last) >= period,
        }
    }
}

pub struct Scheduler<Ctx, C: Clock> {
    clock: C,
    idle: Duration,
    tasks: Vec<Task<Ctx>>,
}

impl<Ctx, C: Clock> Scheduler<Ctx, C> {
    /// `idle` is how long to sleep between ticks.
    pub fn new(clock: C, idle: Duration) -> Self {
        Self {
            clock,
            idle,
            tasks: Vec::new(),
        }
    }

    pub fn every_tick(&mut self, name: &'static str, handler: Handler<Ctx>) -> &mut Self {
        self.tasks.push(Task {
            name,
            period: None,
            last_run: None,
            handler,
        });
        self
    }

    /// First run happens on the first tick.
    pub fn every(&mut self, name: &'static str, period: Duration, handler: Handler<Ctx>) -> &mut Self {
        self.tasks.push(Task {
            name,
            period: Some(period),
            last_run: None,
            handler,
        });
        self
    }

    /// Run every due handler once, in registration order.
    ///
    /// A handler error stops the tick and is returned as-is.
    pub fn run_pending(&mut self, ctx: &mut Ctx) -> Result<()> {
        for task in &mut self.tasks {
            let now = self.clock.now();
            if !task.is_due(now) {
                continue;
            }
            task.last_run = Some(now);
            (task.handler)(ctx).map_err(|e| e.context(format!("task '{}' failed", task.name)))?;
        }
        Ok(())
    }

    /// Tick until `should_stop` says so or a handler fails.
    pub fn run(&mut self, ctx: &mut Ctx, should_stop: impl Fn() -> bool) -> Result<()> {
        while !should_stop() {
            self.run_pending(ctx)?;
            self.clock.sleep(self.idle);
        }
        Ok(())
    }

    #[cfg(test)]
    fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct FakeClock {
        now: Cell<Instant>,
    }

    impl FakeClock {
        fn new() -> Self {
            Self {
                now: Cell::new(Instant::now()),
            }
        }
        fn advance(&self, d: Duration) {
            self.now.set(self.now.get() + d);
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            self.now.get()
        }
        fn sleep(&self, d: Duration) {
            self.advance(d);
        }
    }

    #[derive(Default)]
    struct Counts {
        fast: u32,
        slow: u32,
    }

    fn scheduler() -> Scheduler<Counts, FakeClock> {
        let mut s = Scheduler::new(FakeClock::new(), Duration::from_millis(10));
        s.every_tick("fast", |c: &mut Counts| {
            c.fast += 1;
            Ok(())
        })
        .every("slow", Duration::from_secs(1), |c: &mut Counts| {
            c.slow += 1;
            Ok(())
        });
        s
    }

    #[test]
    fn test_periodic_runs_immediately_then_waits() {
        let mut s = scheduler();
        let mut counts = Counts::default();

        s.run_pending(&mut counts).unwrap();
        assert_eq!((counts.fast, counts.slow), (1, 1));

        s.clock().advance(Duration::from_millis(999));
        s.run_pending(&mut counts).unwrap();
        assert_eq!((counts.fast, counts.slow), (2, 1));

        s.clock().advance(Duration::from_millis(1));
        s.run_pending(&mut counts).unwrap();
        assert_eq!((counts.fast, counts.slow), (3, 2));
    }

    #[test]
    fn test_run_until_stopped() {
        let mut s = scheduler();
        let mut counts = Counts::default();
        let ticks = Cell::new(0u32);

        // 10ms idle per tick: 250 ticks is 2.5s of fake time
        s.run(&mut counts, || {
            ticks.set(ticks.get() + 1);
            ticks.get() > 250
        })
        .unwrap();

        assert_eq!(counts.fast, 250);
        assert_eq!(counts.slow, 3);
    }

    #[test]
    fn test_handler_error_stops_loop() {
        let mut s: Scheduler<Counts, FakeClock> = Scheduler::new(FakeClock::new(), Duration::from_millis(10));
        s.every_tick("boom", |c: &mut Counts| {
            c.fast += 1;
            if c.fast == 3 {
                anyhow::bail!("device gone");
            }
            Ok(())
        });
        let mut counts = Counts::default();

        let err = s.run(&mut counts, || false).unwrap_err();
        assert_eq!(counts.fast, 3);
        assert!(format!("{err:#}").contains("device gone"));
        assert!(format!("{err:#}").contains("boom"));
    }
}
