use crossbeam_channel::{bounded, Receiver};
use std::thread;

use crate::fs::FileStat;

/// Sum every stat received until the channel closes.
///
/// Always returns exactly one stat labeled "result"; an empty stream
/// yields zero size and zero count.
pub fn aggregate(stats: Receiver<FileStat>) -> FileStat {
    let mut total = FileStat::result();
    for stat in stats.iter() {
        total.add(&stat);
    }
    total
}

/// Run [`aggregate`] on its own thread and hand back a channel that
/// delivers the single final result
pub fn spawn_aggregator(stats: Receiver<FileStat>) -> Receiver<FileStat> {
    let (result_tx, result_rx) = bounded(1);
    thread::spawn(move || {
        let _ = result_tx.send(aggregate(stats));
    });
    result_rx
}
