//! Golden tests for whole transmit logs

use bzlog::transfer::{classify_line, CombinedGroupTracker, LineError};
use bzlog::{parse_file, parse_str, TransferKind, TransferRecord};

use super::helpers::{fixture_path, load_fixture};

const DOCKER: &str = "/Users/daniel/Library/Containers/com.docker.docker/Data/vms/0/Docker.qcow2";
const EBOOK: &str = "/Volumes/Space/archive/media/ebooks/ebook-1100/Over 1100 General Computer Ebooks/The UNIX CD Bookshelf, v3.0 (2003).zip";
const QBB: &str = "/Users/daniel/GoogleDrive/Jobs/Sologlobe/Sologlobe  Mar 08,2013  03 40 PM.QBB";
const BATCH_OF_3: &str =
    "Multiple small files batched in one request, the 3 files are listed below:";
const BATCH_OF_7: &str =
    "Multiple small files batched in one request, the 7 files are listed below:";

fn sent(
    kind: TransferKind,
    stamp: &str,
    speed: u64,
    size: u64,
    chunk: i64,
    fname: &str,
) -> TransferRecord {
    TransferRecord {
        kind,
        stamp: stamp.to_string(),
        speed,
        speed_unit: "kBits/sec".to_string(),
        size,
        size_unit: "bytes".to_string(),
        chunk,
        fname: fname.to_string(),
    }
}

fn batched(
    kind: TransferKind,
    stamp: &str,
    speed: u64,
    size: u64,
    chunk: i64,
    fname: &str,
) -> TransferRecord {
    TransferRecord {
        size_unit: "bytes*".to_string(),
        ..sent(kind, stamp, speed, size, chunk, fname)
    }
}

fn dedup(kind: TransferKind, stamp: &str, chunk: i64, fname: &str) -> TransferRecord {
    TransferRecord {
        kind,
        stamp: stamp.to_string(),
        size_unit: "bytes".to_string(),
        chunk,
        fname: fname.to_string(),
        ..Default::default()
    }
}

/// Classify every line in order, keeping skipped kinds too.
fn classify_all(content: &str) -> Vec<TransferRecord> {
    let mut tracker = CombinedGroupTracker::new();
    content
        .lines()
        .map(|line| classify_line(line, &mut tracker).unwrap().record)
        .collect()
}

fn transmitted_log() -> Vec<TransferRecord> {
    use TransferKind::*;
    vec![
        sent(
            Normal,
            "2018-10-02 13:27:18",
            3112,
            30460266,
            0,
            "/Volumes/Space/archive/media/video/PMB/12-23-2008(1)/20081219122438.mpg",
        ),
        dedup(
            Dedup,
            "2018-10-10 01:40:42",
            0,
            "/Users/daniel/Library/Containers/com.evernote.Evernote/Data/Library/Application Support/com.evernote.Evernote/puppetmaster/OutputsCache.json",
        ),
        batched(CombinedHeader, "2018-10-01 15:25:14", 3822, 3489825, 3, BATCH_OF_3),
        batched(
            CombinedContinued,
            "2018-10-01 15:25:14",
            3822,
            3489825,
            -3,
            "/Volumes/Space/archive/media/photo/catou/2005_11_02-R/IMG_0927.JPG",
        ),
        batched(
            CombinedContinued,
            "2018-10-01 15:25:14",
            3822,
            3489825,
            -2,
            "/Volumes/Space/archive/media/photo/catou/2007-07-04-lesours/IMG_4941.JPG",
        ),
        batched(
            CombinedContinued,
            "2018-10-01 15:25:14",
            3822,
            3489825,
            -1,
            "/Users/daniel/GoogleDrive/Google Photos/2013/12/IMG_1490.JPG",
        ),
        sent(Chunked, "2018-10-11 10:49:34", 1643, 410714, 1305, DOCKER),
        sent(Chunked, "2018-10-11 10:49:35", 1973, 634794, 1322, DOCKER),
        sent(Chunked, "2018-10-11 10:49:37", 2604, 834682, 1349, DOCKER),
    ]
}

fn transmitted_sample_log() -> Vec<TransferRecord> {
    use TransferKind::*;
    vec![
        TransferRecord::empty(),
        sent(
            Normal,
            "2018-10-17 18:39:45",
            8,
            1,
            0,
            "/Volumes/Space/fake_filename_to_refresh_volume_dashboard.txt",
        ),
        sent(
            Normal,
            "2018-10-02 02:39:30",
            3450,
            7827914,
            0,
            "/Volumes/Space/archive/media/mp3/creative/Binye (Respect)/08-Seourouba.mp3",
        ),
        sent(
            Normal,
            "2018-10-02 02:39:36",
            4972,
            7832042,
            0,
            "/Volumes/Space/archive/media/mp3/peered/Brazil-Rodrigo/Cantoria 1 - Elomar, Geraldo Azevedo, Vital Faria e Xangai - 1984/09 Cantiga do Estradar.mp3",
        ),
        dedup(
            Dedup,
            "2018-10-01 03:35:31",
            0,
            "/Users/daniel/.bash_sessions/34D616D0-93F6-4AF2-AD60-9A5D4B83C76A.historynew",
        ),
        dedup(
            Dedup,
            "2018-10-01 03:35:48",
            0,
            "/Volumes/Space/archive/media/photo/dadSulbalcon/200308/Catherine35Ans2003/130-3052_IMG.JPG",
        ),
        dedup(DedupChunked, "2018-10-02 13:32:57", 0, QBB),
        dedup(DedupChunked, "2018-10-02 13:32:57", 1, QBB),
        batched(CombinedHeader, "2018-10-01 00:00:18", 3429, 1616376, 7, BATCH_OF_7),
        batched(CombinedHeader, "2018-10-01 00:00:22", 2632, 1645021, 7, BATCH_OF_7),
        batched(
            CombinedContinued,
            "2018-10-01 00:00:18",
            2632,
            1645021,
            -7,
            "/Volumes/Space/archive/media/photo/dad/2003/2003_08_23/129-2919_IMG.JPG",
        ),
        batched(
            CombinedContinued,
            "2018-10-01 00:00:18",
            2632,
            1645021,
            -6,
            "/Volumes/Space/archive/media/photo/dad/2003/2003_07_06/125-2583_IMG.JPG",
        ),
        sent(Chunked, "2018-10-02 13:30:58", 28, 7290, 3, EBOOK),
        sent(Chunked, "2018-10-02 13:31:15", 4143, 10486490, 0, EBOOK),
    ]
}

#[test]
fn transmitted_log_classifies_every_line() {
    assert_eq!(classify_all(&load_fixture("transmitted.log")), transmitted_log());
}

#[test]
fn transmitted_sample_log_classifies_every_line() {
    assert_eq!(
        classify_all(&load_fixture("transmitted-sample.log")),
        transmitted_sample_log()
    );
}

#[test]
fn parse_file_keeps_only_delivered_records() {
    let report = parse_file(fixture_path("transmitted.log")).unwrap();
    let expected: Vec<TransferRecord> = transmitted_log()
        .into_iter()
        .filter(TransferRecord::is_deliverable)
        .collect();

    assert_eq!(report.records, expected);
    assert!(report.is_clean());
    assert!(report.irregular.is_empty());
    assert_eq!(report.stats.lines, 9);
    assert_eq!(report.stats.count(TransferKind::Dedup), 1);
    assert_eq!(report.stats.count(TransferKind::CombinedHeader), 1);
    assert_eq!(report.stats.incomplete_batches, 0);
    assert_eq!(report.first_date(), Some("2018-10-02"));
}

#[test]
fn sample_log_counts_unfinished_batches() {
    let report = parse_file(fixture_path("transmitted-sample.log")).unwrap();

    assert_eq!(report.stats.lines, 14);
    assert_eq!(report.stats.delivered(), 7);
    assert_eq!(report.stats.count(TransferKind::Empty), 1);
    assert_eq!(report.stats.count(TransferKind::DedupChunked), 2);
    // first header replaced, second one still missing five files
    assert_eq!(report.stats.incomplete_batches, 2);
}

#[test]
fn parse_str_matches_parse_file() {
    let from_str = parse_str(&load_fixture("transmitted-sample.log"));
    let from_file = parse_file(fixture_path("transmitted-sample.log")).unwrap();
    assert_eq!(from_str.records, from_file.records);
    assert_eq!(from_str.stats.lines, from_file.stats.lines);
}

#[test]
fn malformed_lines_are_reported_not_fatal() {
    let report = parse_file(fixture_path("malformed.log")).unwrap();

    let errors: Vec<(usize, &LineError)> = report
        .failures
        .iter()
        .map(|f| (f.line_number, &f.error))
        .collect();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].0, 2);
    assert!(matches!(errors[0].1, LineError::MalformedTimestamp { .. }));
    assert_eq!(errors[1].0, 3);
    assert!(matches!(errors[1].1, LineError::MalformedChunk { .. }));
    assert_eq!(errors[2], (4, &LineError::OrphanContinuation));

    assert_eq!(report.irregular.len(), 1);
    assert_eq!(report.irregular[0].line_number, 5);

    let names: Vec<&str> = report.records.iter().map(|r| r.fname.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "/Volumes/Space/archive/media/video/PMB/12-23-2008(1)/20081219122438.mpg",
            "relative/path.txt",
        ]
    );
    assert_eq!(report.records[1].speed, 1000);
    assert_eq!(report.records[1].size, 2048);
    assert!(!report.is_clean());
}
