//! The output gate driven from several threads at once through the public API.

use std::io::Write;
use std::sync::{Arc, Barrier};

use uwutils::redirect::ParallelSink;
use uwutils::sink::Capture;

#[test]
fn test_only_enabled_threads_reach_the_sink() {
    let capture = Capture::new();
    let gate = ParallelSink::new(capture.sink());
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let gate = gate.clone();
            let barrier = barrier.clone();
            std::thread::spawn(move || {
                if i % 2 == 1 {
                    gate.disable(None);
                }
                barrier.wait();
                for _ in 0..50 {
                    writeln!(&*gate, "t{i}").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let contents = capture.contents();
    for i in 0..6 {
        let count = contents.lines().filter(|line| *line == format!("t{i}")).count();
        let expected = if i % 2 == 0 { 50 } else { 0 };
        assert_eq!(count, expected, "thread {i}");
    }
}

#[test]
fn test_scoped_disable_on_one_thread_leaves_others_alone() {
    let capture = Capture::new();
    let gate = ParallelSink::new(capture.sink());
    let inside = Arc::new(Barrier::new(2));
    let done = Arc::new(Barrier::new(2));

    let quiet = {
        let gate = gate.clone();
        let inside = inside.clone();
        let done = done.clone();
        std::thread::spawn(move || {
            gate.disable_during(None, || {
                inside.wait();
                write!(&*gate, "quiet")?;
                done.wait();
                Ok(())
            })
            .unwrap();
            gate.is_enabled(None)
        })
    };

    inside.wait();
    assert!(gate.is_enabled(None));
    write!(&*gate, "loud").unwrap();
    done.wait();

    assert!(quiet.join().unwrap());
    assert_eq!(capture.contents(), "loud");
}

#[test]
fn test_redirect_frames_per_thread() {
    let base = Capture::new();
    let gate = ParallelSink::new(base.sink());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let gate = gate.clone();
            std::thread::spawn(move || {
                let mine = Capture::new();
                gate.set_stream(None, mine.sink()).unwrap();
                gate.setup(None).unwrap();
                write!(&*gate, "base{i};").unwrap();
                gate.backup(None).unwrap();
                write!(&*gate, "mine{i}").unwrap();
                mine.contents()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("mine{i}"));
    }
    assert!(gate.is_empty());
    assert_eq!(base.contents().matches("base").count(), 4);
}
