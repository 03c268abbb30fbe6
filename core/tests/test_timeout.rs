// Timeout race: per-operation deadlines, non-cancelling workers.

mod common;

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::time::{Duration, Instant};

    use onwire_core::stream::{race, read_message, write_message, Deadline, SharedStream};
    use onwire_core::types::PipelineError;

    use super::common::DelayStream;

// # ✅ 1. Outcomes of a race

    #[test]
    fn race_returns_value() {
        let v = race("add", Duration::from_secs(1), || Ok(2 + 2)).unwrap();
        assert_eq!(v, 4);
    }

    #[test]
    fn race_propagates_operation_error_unchanged() {
        let err = race::<(), _>("check", Duration::from_secs(1), || {
            Err(PipelineError::NonceInvalid { nonce: 9 })
        })
        .unwrap_err();
        assert!(matches!(err, PipelineError::NonceInvalid { nonce: 9 }));
    }

    #[test]
    fn race_times_out_with_operation_label() {
        let start = Instant::now();
        let err = race("slow op", Duration::from_millis(20), || {
            thread::sleep(Duration::from_millis(500));
            Ok(())
        })
        .unwrap_err();

        assert!(start.elapsed() < Duration::from_millis(400));
        assert!(err.is_timeout());
        match err {
            PipelineError::TimedOut { operation, after } => {
                assert_eq!(operation, "slow op");
                assert_eq!(after, Duration::from_millis(20));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn timed_out_worker_keeps_running() {
        let finished = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&finished);

        let err = race("background", Duration::from_millis(10), move || {
            thread::sleep(Duration::from_millis(100));
            flag.store(true, Ordering::SeqCst);
            Ok(())
        })
        .unwrap_err();
        assert!(err.is_timeout());
        assert!(!finished.load(Ordering::SeqCst));

        thread::sleep(Duration::from_millis(400));
        assert!(finished.load(Ordering::SeqCst));
    }

    #[test]
    fn panicking_worker_is_reported() {
        let err = race::<(), _>("boom", Duration::from_secs(1), || panic!("worker panic")).unwrap_err();
        assert!(matches!(err, PipelineError::WorkerLost { .. }));
    }

// # ✅ 2. Deadline placement

    #[test]
    fn deadline_reports_whether_a_limit_is_set() {
        assert!(!Deadline::none().is_enabled());
        assert!(!Deadline::from_option(None).is_enabled());
        assert!(Deadline::after(Duration::from_millis(5)).is_enabled());

        let d = Deadline::from_option(Some(Duration::from_millis(5)));
        assert!(d.is_enabled());
        assert_eq!(d.limit(), Some(Duration::from_millis(5)));
    }

    #[test]
    fn no_deadline_runs_inline() {
        let caller = thread::current().id();
        let ran_on = Deadline::none().run("inline", move || Ok(thread::current().id())).unwrap();
        assert_eq!(ran_on, caller);
    }

    #[test]
    fn deadline_runs_on_named_worker() {
        let name = Deadline::after(Duration::from_secs(1))
            .run("named", || Ok(thread::current().name().map(str::to_owned)))
            .unwrap();
        assert_eq!(name.as_deref(), Some("onwire-race"));
    }

// # ❌ 3. Slow and fast streams

    #[test]
    fn slow_stream_write_times_out() {
        let stream = SharedStream::new(DelayStream::new(Duration::from_millis(200)));
        let err = write_message(&stream, vec![1u8; 10], &Deadline::after(Duration::from_millis(10)))
            .unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn slow_stream_read_times_out() {
        let stream = SharedStream::new(DelayStream::with_bytes(
            vec![0, 0, 0, 1, 42, 0, 0, 0, 0],
            Duration::from_millis(200),
        ));
        let err = read_message(&stream, &Deadline::after(Duration::from_millis(10))).unwrap_err();
        assert!(err.is_timeout());
    }

    #[test]
    fn fast_stream_completes_under_deadline() {
        let stream = SharedStream::new(DelayStream::new(Duration::from_millis(1)));
        let deadline = Deadline::after(Duration::from_millis(500));

        let payload = vec![5u8; 3000];
        let written = write_message(&stream, payload.clone(), &deadline).unwrap();
        let (read_back, consumed) = read_message(&stream, &deadline).unwrap();

        assert_eq!(read_back, payload);
        assert_eq!(consumed, written);
    }

    #[test]
    fn each_frame_gets_a_fresh_deadline() {
        // 6 frames x 40ms is well past 100ms in total, but each frame fits.
        let stream = SharedStream::new(DelayStream::new(Duration::from_millis(40)));
        let deadline = Deadline::after(Duration::from_millis(100));

        let start = Instant::now();
        let written = write_message(&stream, vec![8u8; 5 * 1024], &deadline).unwrap();

        assert_eq!(written, 5 * 1024 + 6 * 4);
        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
