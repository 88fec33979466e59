use std::{sync::Arc, time::Duration};

use breakfast_signal::{
    indicator::{IndicatorDriver, IndicatorState, PinMap},
    scheduler::{CookPhase, CookScheduler},
    serve_lines,
};
use tokio::{io::AsyncWriteExt, runtime::Handle, time::sleep};

fn leds(pending: bool, cooking: bool, ready: bool) -> IndicatorState {
    IndicatorState {
        pending,
        cooking,
        ready,
    }
}

fn simulated_scheduler() -> (Arc<IndicatorDriver>, CookScheduler) {
    let driver = Arc::new(IndicatorDriver::simulated(PinMap::default()));
    let scheduler = CookScheduler::new(Arc::clone(&driver), Handle::current());
    (driver, scheduler)
}

#[tokio::test(start_paused = true)]
async fn stop_over_the_link_cancels_breakfast() {
    let (driver, scheduler) = simulated_scheduler();
    let (mut phone, link) = tokio::io::duplex(64);

    let reader_scheduler = scheduler.clone();
    let reader = tokio::spawn(async move { serve_lines(link, &reader_scheduler).await });

    phone.write_all(b"START 5\n").await.unwrap();
    sleep(Duration::from_secs(100)).await;
    assert_eq!(driver.snapshot(), leds(true, false, false));

    phone.write_all(b"STOP\n").await.unwrap();
    sleep(Duration::from_secs(1)).await;
    assert!(driver.snapshot().all_off());

    drop(phone);
    assert_eq!(reader.await.unwrap().unwrap(), 2);

    sleep(Duration::from_secs(400)).await;
    assert!(driver.snapshot().all_off());
    assert_eq!(scheduler.phase(), CookPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn observers_see_full_breakfast_sequence() {
    let (driver, scheduler) = simulated_scheduler();
    let mut changes = driver.subscribe();

    let input: &[u8] = b"  START 2  \r\n";
    serve_lines(input, &scheduler).await.unwrap();

    let mut seen = vec![*changes.borrow_and_update()];
    while scheduler.phase() != CookPhase::Idle {
        changes.changed().await.unwrap();
        seen.push(*changes.borrow_and_update());
    }

    assert_eq!(seen.first(), Some(&leds(true, false, false)));
    assert!(seen.contains(&leds(true, true, false)));
    assert_eq!(seen.last(), Some(&leds(false, false, true)));
}

#[tokio::test(start_paused = true)]
async fn replacement_session_over_the_link() {
    let (driver, scheduler) = simulated_scheduler();

    let input: &[u8] = b"START 5\nSTART 2\n";
    serve_lines(input, &scheduler).await.unwrap();
    assert_eq!(scheduler.status().minutes, Some(2));

    sleep(Duration::from_secs(121)).await;
    assert_eq!(driver.snapshot(), leds(false, false, true));

    sleep(Duration::from_secs(300)).await;
    assert_eq!(driver.snapshot(), leds(false, false, true));
}

#[tokio::test(start_paused = true)]
async fn garbage_on_the_link_is_ignored() {
    let (driver, scheduler) = simulated_scheduler();

    let input: &[u8] = b"HELLO\nSTART\nSTART abc\nSTOP please\n";
    assert_eq!(serve_lines(input, &scheduler).await.unwrap(), 4);

    sleep(Duration::from_secs(600)).await;
    assert!(driver.snapshot().all_off());
    assert_eq!(scheduler.phase(), CookPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn stop_after_garbled_bytes_still_arrives() {
    let (driver, scheduler) = simulated_scheduler();
    let (mut phone, link) = tokio::io::duplex(64);

    let reader_scheduler = scheduler.clone();
    let reader = tokio::spawn(async move { serve_lines(link, &reader_scheduler).await });

    phone.write_all(b"START 5\n\xff\xfe\n").await.unwrap();
    sleep(Duration::from_secs(100)).await;
    assert_eq!(driver.snapshot(), leds(true, false, false));

    phone.write_all(b"STOP\n").await.unwrap();
    sleep(Duration::from_secs(1)).await;
    assert!(driver.snapshot().all_off());

    drop(phone);
    assert_eq!(reader.await.unwrap().unwrap(), 3);

    sleep(Duration::from_secs(400)).await;
    assert!(driver.snapshot().all_off());
}
