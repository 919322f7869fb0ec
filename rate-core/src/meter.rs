use std::sync::atomic::{AtomicU64, Ordering};

/// Byte counter shared between the read path and the reporter
///
/// The read path only ever [`adds`](Meter::add) to it, the reporter only ever
/// [`drains`](Meter::drain) it. Both are single atomic operations, so every
/// counted byte is observed by exactly one drain.
#[derive(Debug, Default)]
pub(crate) struct Meter(AtomicU64);

impl Meter {
    pub fn add(&self, bytes: u64) {
        self.0.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Return the bytes counted since the last drain and reset the counter to zero
    pub fn drain(&self) -> u64 {
        self.0.swap(0, Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{sync::Arc, thread};

    #[test]
    fn drain_resets() {
        let meter = Meter::default();
        meter.add(100);
        meter.add(23);

        assert_eq!(meter.drain(), 123);
        assert_eq!(meter.drain(), 0);

        meter.add(7);
        assert_eq!(meter.drain(), 7);
    }

    #[test]
    fn concurrent_adds_are_conserved() {
        const WRITERS: u64 = 4;
        const ADDS: u64 = 10_000;

        let meter = Arc::new(Meter::default());

        let writers = (0..WRITERS)
            .map(|_| {
                let meter = meter.clone();
                thread::spawn(move || {
                    for _ in 0..ADDS {
                        meter.add(3);
                    }
                })
            })
            .collect::<Vec<_>>();

        let mut drained = 0;
        while !writers.iter().all(|writer| writer.is_finished()) {
            drained += meter.drain();
        }
        for writer in writers {
            writer.join().unwrap();
        }
        drained += meter.drain();

        assert_eq!(drained, WRITERS * ADDS * 3);
    }
}
