use std::{collections::HashMap, ops::Range, sync::mpsc, thread};

use super::{AssetEntry, EntryFilter, HistoryEntry};

/// `(log, index within log, entry)`
type Match<'a> = (usize, usize, &'a HistoryEntry);

/// One contiguous slice of one log.
type Job = (usize, Range<usize>);

/// Parallel filter over a wallet's transfer history.
///
/// Each log is split into one contiguous chunk per worker; workers send
/// matching entries over a channel and the collected matches are sorted
/// by time, so the output order never depends on which worker finished
/// first. The engine takes no locks: callers hold whatever lock guards the
/// logs for the duration of a query.
#[derive(Debug, Clone)]
pub struct FilterEngine {
    workers: usize,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterEngine {
    /// One worker per available CPU.
    pub fn new() -> Self {
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self { workers }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Entries matching `filter`, oldest first (newest first if
    /// `filter.descending`), after `offset` and `limit`.
    pub fn filter(&self, entries: &[HistoryEntry], filter: &EntryFilter) -> Vec<HistoryEntry> {
        self.run(&[entries], filter)
            .into_iter()
            .map(|(_, _, e)| e.clone())
            .collect()
    }

    /// Like [`FilterEngine::filter`] over per-asset logs keyed by asset id.
    ///
    /// With `scid` set only that asset's log is searched, otherwise every
    /// log is searched and the matches are merged into one time-ordered
    /// result. Each returned entry carries the id of its asset.
    pub fn filter_assets(
        &self,
        assets: &HashMap<String, Vec<HistoryEntry>>,
        scid: Option<&str>,
        filter: &EntryFilter,
    ) -> Vec<AssetEntry> {
        let mut selected: Vec<(&String, &Vec<HistoryEntry>)> = assets
            .iter()
            .filter(|(id, _)| scid.map_or(true, |want| want == id.as_str()))
            .collect();
        // ties on time are broken by asset id, not by map order
        selected.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let logs: Vec<&[HistoryEntry]> = selected.iter().map(|(_, e)| e.as_slice()).collect();
        self.run(&logs, filter)
            .into_iter()
            .map(|(log, _, e)| AssetEntry {
                scid: selected[log].0.clone(),
                entry: e.clone(),
            })
            .collect()
    }

    fn run<'a>(&self, logs: &[&'a [HistoryEntry]], filter: &EntryFilter) -> Vec<Match<'a>> {
        let jobs: Vec<Job> = logs
            .iter()
            .enumerate()
            .flat_map(|(log, entries)| {
                partition(entries.len(), self.workers)
                    .into_iter()
                    .map(move |range| (log, range))
            })
            .collect();
        if jobs.is_empty() {
            return Vec::new();
        }

        let mut matches = fan_out(logs, filter, jobs, self.workers);

        // log and index break ties between entries with the same time
        matches.sort_unstable_by_key(|(log, i, e)| (e.time, *log, *i));
        if filter.descending {
            matches.reverse();
        }

        matches
            .into_iter()
            .skip(filter.offset.unwrap_or(0))
            .take(filter.limit.unwrap_or(usize::MAX))
            .collect()
    }
}

/// Split `0..len` into at most `workers` contiguous, gap-free ranges.
/// The last range absorbs the remainder.
pub(crate) fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = workers.clamp(1, len);
    let size = len / workers;

    (0..workers)
        .map(|i| {
            let start = i * size;
            let end = if i == workers - 1 { len } else { start + size };
            start..end
        })
        .collect()
}

fn scan_chunk<'a>(
    logs: &[&'a [HistoryEntry]],
    (log, range): Job,
    filter: &EntryFilter,
    sender: &mpsc::Sender<Match<'a>>,
) {
    let entries = logs[log];
    for i in range {
        let entry = &entries[i];
        if filter.matches(entry) {
            // receiver outlives every worker
            let _ = sender.send((log, i, entry));
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
fn fan_out<'a>(
    logs: &[&'a [HistoryEntry]],
    filter: &EntryFilter,
    jobs: Vec<Job>,
    _workers: usize,
) -> Vec<Match<'a>> {
    use rayon::prelude::*;

    let (sender, receiver) = mpsc::channel();
    jobs.into_par_iter()
        .for_each_with(sender, |tx, job| scan_chunk(logs, job, filter, tx));

    // for_each_with has dropped every sender clone, the channel is closed
    receiver.into_iter().collect()
}

// Fallback without rayon: scoped std threads, or the caller's thread on WASM
#[cfg(not(all(not(target_arch = "wasm32"), feature = "parallel")))]
fn fan_out<'a>(
    logs: &[&'a [HistoryEntry]],
    filter: &EntryFilter,
    jobs: Vec<Job>,
    workers: usize,
) -> Vec<Match<'a>> {
    let (sender, receiver) = mpsc::channel();

    if cfg!(target_arch = "wasm32") {
        for job in jobs {
            scan_chunk(logs, job, filter, &sender);
        }
    } else {
        let per_thread = jobs.len().div_ceil(workers.max(1));
        thread::scope(|s| {
            for batch in jobs.chunks(per_thread) {
                let tx = sender.clone();
                s.spawn(move || {
                    for job in batch {
                        scan_chunk(logs, job.clone(), filter, &tx);
                    }
                });
            }
        });
    }

    drop(sender);
    receiver.into_iter().collect()
}
