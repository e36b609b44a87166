use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    thread,
    time::Duration as StdDuration,
};

use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};
use serde_json::{json, Value};
use simply_countdown::{
    countdown::{CountdownExt, Host, HostTimezone, Options, TickerPhase},
    dom::{Document, SharedDocument},
    ManualClock, MonotonicClock,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

/// Options targeting `start() + ahead`, read in UTC
fn target_options(ahead: Duration, extra: Value) -> Options {
    let target = start() + ahead;
    Options::new(json!({
        "year": target.year(),
        "month": target.month(),
        "day": target.day(),
        "hours": target.hour(),
        "minutes": target.minute(),
        "seconds": target.second(),
    }))
    .merge(&extra)
}

fn page(ids: &[&str]) -> SharedDocument {
    let mut doc = Document::new();
    let root = doc.root();
    for id in ids {
        let container = doc.create_element("div");
        doc.set_id(container, id);
        doc.add_class(container, "countdown");
        doc.append_child(root, container);
    }
    SharedDocument::new(doc)
}

fn host(document: &SharedDocument) -> Host {
    Host::new(document.clone())
        .with_clock(MonotonicClock::new(start()))
        .with_timezone(HostTimezone::utc())
}

fn texts(document: &SharedDocument, selector: &str) -> Vec<String> {
    document.read(|doc| {
        doc.query_selector_all(selector)
            .unwrap()
            .into_iter()
            .map(|node| doc.text(node).to_string())
            .collect()
    })
}

fn counter() -> (Arc<AtomicUsize>, impl Fn() + Send + Sync + 'static) {
    let calls = Arc::new(AtomicUsize::new(0));
    let inner = Arc::clone(&calls);
    (calls, move || {
        inner.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn first_tick_decomposes_remaining_time() {
    let document = page(&["a"]);
    let ahead = Duration::days(3) + Duration::hours(7) + Duration::minutes(45) + Duration::seconds(9);

    let countdowns = host(&document)
        .simply_countdown(".countdown", target_options(ahead, json!({})))
        .unwrap();

    assert_eq!(countdowns.len(), 1);
    let amounts: Vec<u64> = texts(&document, "#a .simply-amount")
        .iter()
        .map(|t| t.parse().unwrap())
        .collect();
    assert_eq!(amounts, vec![3, 7, 45, 9]);
    assert_eq!(
        amounts[0] * 86_400 + amounts[1] * 3_600 + amounts[2] * 60 + amounts[3],
        ahead.num_seconds() as u64
    );
    assert_eq!(
        texts(&document, "#a .simply-word"),
        vec!["days", "hours", "minutes", "seconds"]
    );
    assert_eq!(countdowns[0].status().phase, TickerPhase::Running);
}

#[tokio::test(start_paused = true)]
async fn inline_mode_renders_sentence() {
    let document = page(&["a"]);
    let ahead = Duration::days(1) + Duration::hours(2) + Duration::minutes(3) + Duration::seconds(4);

    host(&document)
        .simply_countdown(".countdown", target_options(ahead, json!({ "inline": true })))
        .unwrap();

    assert_eq!(
        texts(&document, "#a .simply-countdown-inline"),
        vec!["1 day, 2 hours, 3 minutes, 4 seconds."]
    );
}

#[tokio::test(start_paused = true)]
async fn refreshes_until_expiry_then_stops() {
    let document = page(&["a"]);
    let (calls, on_end) = counter();
    let options = target_options(Duration::seconds(3), json!({ "zeroPad": true })).on_end(on_end);

    let mut countdowns = host(&document).simply_countdown(".countdown", options).unwrap();
    let countdown = countdowns.remove(0);
    let mut updates = countdown.subscribe();

    assert_eq!(texts(&document, "#a .simply-amount"), vec!["00", "00", "00", "03"]);

    updates.changed().await.unwrap();
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["00", "00", "00", "02"]);
    assert_eq!(texts(&document, "#a .simply-word")[3], "seconds");

    updates.changed().await.unwrap();
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["00", "00", "00", "01"]);
    assert_eq!(texts(&document, "#a .simply-word")[3], "second");
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let status = countdown.subscribe();
    countdown.finished().await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["00", "00", "00", "00"]);
    let final_status = status.borrow().clone();
    assert_eq!(final_status.phase, TickerPhase::Expired);
    assert_eq!(final_status.ticks, 4);

    let frozen = document.read(Document::to_html);
    tokio::time::advance(StdDuration::from_secs(30)).await;
    tokio::task::yield_now().await;
    assert_eq!(document.read(Document::to_html), frozen);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn past_target_expires_immediately() {
    let document = page(&["a"]);
    let (calls, on_end) = counter();
    let options = target_options(Duration::seconds(-30), json!({})).on_end(on_end);

    let countdowns = host(&document).simply_countdown(".countdown", options).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(countdowns[0].status().phase, TickerPhase::Expired);
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["0", "0", "0", "0"]);
    assert_eq!(texts(&document, "#a .simply-word"), vec!["day", "hour", "minute", "second"]);

    for countdown in countdowns {
        countdown.finished().await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn each_match_gets_its_own_instance() {
    let document = page(&["a", "b", "c"]);
    let (calls, on_end) = counter();
    let options = target_options(Duration::seconds(2), json!({})).on_end(on_end);

    let countdowns = host(&document).simply_countdown(".countdown", options).unwrap();

    assert_eq!(countdowns.len(), 3);
    let targets: Vec<_> = countdowns.iter().map(|c| c.status().target).collect();
    assert!(targets.iter().all(|t| *t == Some(start() + Duration::seconds(2))));

    let mut containers: Vec<_> = countdowns.iter().map(|c| c.container()).collect();
    containers.dedup();
    assert_eq!(containers.len(), 3);

    for id in ["a", "b", "c"] {
        assert_eq!(texts(&document, &format!("#{} .simply-section", id)).len(), 4);
    }
    assert_eq!(texts(&document, ".simply-amount").len(), 12);

    for countdown in countdowns {
        countdown.finished().await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn selection_adapter_forwards_selector() {
    let document = page(&["a", "b"]);
    let host = host(&document);
    let selection = host.select("#b");

    assert_eq!(selection.selector(), "#b");
    assert_eq!(selection.nodes().unwrap().len(), 1);

    let countdowns = selection
        .simply_countdown(target_options(Duration::minutes(5), json!({ "inline": true })))
        .unwrap();

    assert_eq!(countdowns.len(), 1);
    assert_eq!(
        texts(&document, "#b .simply-countdown-inline"),
        vec!["0 day, 0 hour, 5 minutes, 0 second."]
    );
    assert!(texts(&document, "#a .simply-countdown-inline").is_empty());
}

#[tokio::test(start_paused = true)]
async fn clock_jump_is_picked_up_on_next_tick() {
    let document = page(&["a"]);
    let clock = ManualClock::new(start());
    let host = Host::new(document.clone())
        .with_clock(clock.clone())
        .with_timezone(HostTimezone::utc());

    let countdowns = host
        .simply_countdown(".countdown", target_options(Duration::hours(1), json!({ "refresh": 500 })))
        .unwrap();
    let mut updates = countdowns[0].subscribe();
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["0", "1", "0", "0"]);

    clock.advance(Duration::minutes(59) + Duration::seconds(30));
    updates.changed().await.unwrap();
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["0", "0", "0", "30"]);

    clock.advance(Duration::minutes(1));
    updates.changed().await.unwrap();
    assert_eq!(updates.borrow().phase, TickerPhase::Expired);
}

#[tokio::test(start_paused = true)]
async fn non_numeric_date_field_expires_on_first_tick() {
    let document = page(&["a"]);
    let (calls, on_end) = counter();
    let options = Options::new(json!({ "year": "soon" })).on_end(on_end);

    let countdowns = host(&document).simply_countdown(".countdown", options).unwrap();

    assert_eq!(countdowns.len(), 1);
    assert_eq!(countdowns[0].status().phase, TickerPhase::Expired);
    assert_eq!(countdowns[0].status().target, None);
    assert_eq!(texts(&document, "#a .simply-amount"), vec!["0", "0", "0", "0"]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    for countdown in countdowns {
        countdown.finished().await;
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn on_end_can_read_the_document() {
    let document = page(&["a"]);
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
    let (reader, sink) = (document.clone(), Arc::clone(&seen));
    let options = target_options(Duration::seconds(1), json!({})).on_end(move || {
        let amounts = texts(&reader, "#a .simply-amount");
        sink.lock().unwrap().extend(amounts);
    });

    let mut countdowns = host(&document).simply_countdown(".countdown", options).unwrap();
    countdowns.remove(0).finished().await;

    assert_eq!(*seen.lock().unwrap(), vec!["0", "0", "0", "0"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn readers_never_see_a_half_rendered_tick() {
    let document = page(&["a"]);
    let clock = ManualClock::new(start());
    let host = Host::new(document.clone())
        .with_clock(clock.clone())
        .with_timezone(HostTimezone::utc());

    let _countdowns = host
        .simply_countdown(".countdown", target_options(Duration::minutes(1), json!({ "refresh": 1 })))
        .unwrap();

    // Every tick moves between 1m00s and 0m59s, which rewrites both the
    // minutes and the seconds amount.
    let stop = Arc::new(AtomicBool::new(false));
    let flipper = {
        let (clock, stop) = (clock.clone(), Arc::clone(&stop));
        thread::spawn(move || {
            while !stop.load(Ordering::Relaxed) {
                clock.set(start());
                thread::sleep(StdDuration::from_micros(200));
                clock.set(start() + Duration::seconds(1));
                thread::sleep(StdDuration::from_micros(200));
            }
        })
    };

    let whole_minute = vec!["0", "0", "1", "0"];
    let just_under = vec!["0", "0", "0", "59"];
    let mut seen_under = false;
    for _ in 0..500 {
        let amounts = texts(&document, "#a .simply-amount");
        assert!(
            amounts == whole_minute || amounts == just_under,
            "read a partially rendered tick: {:?}",
            amounts
        );
        seen_under |= amounts == just_under;
        tokio::time::sleep(StdDuration::from_micros(50)).await;
    }

    stop.store(true, Ordering::Relaxed);
    flipper.join().unwrap();
    assert!(seen_under);
}
