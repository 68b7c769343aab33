//! Pipeline merge sort.
//!
//! `n = 2^k` values flow through `k + 1` stages. Stage 0 feeds the values in
//! from the back, alternating between two queues. Merging stage `i` combines
//! pairs of sorted runs of length `2^(i-1)` into runs of length `2^i` and
//! passes them on to stage `i + 1`. The last stage delivers the fully sorted
//! sequence to the collector.
//!
//! Every merging stage runs on its own thread and talks to its neighbours
//! over a channel. Values carry the tag of the queue they belong to, so a
//! stage can tell the two runs of a block apart even though both arrive on
//! the same channel.

use anyhow::{anyhow, bail, Result};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use tracing::{debug, trace};

/// One of the two input queues of a merging stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Queue {
    First,
    Second,
}

impl Queue {
    /// Queue used for the value (or block) at `position`, alternating from `First`.
    pub fn for_position(position: usize) -> Self {
        if position % 2 == 0 {
            Queue::First
        } else {
            Queue::Second
        }
    }

    pub fn other(self) -> Self {
        match self {
            Queue::First => Queue::Second,
            Queue::Second => Queue::First,
        }
    }

    fn index(self) -> usize {
        match self {
            Queue::First => 0,
            Queue::Second => 1,
        }
    }
}

/// A value travelling between two stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    /// Queue of the receiving stage this value is destined for.
    pub queue: Queue,
    pub value: u8,
}

/// Number of merging stages needed for `len` values (`log2(len)`).
///
/// Empty input needs no stage at all. Any other length must be a power of
/// two, since every stage doubles the run length.
pub fn merge_stage_count(len: usize) -> Result<usize> {
    if len == 0 {
        return Ok(0);
    }
    if !len.is_power_of_two() {
        bail!("pipeline merge sort needs a power-of-two number of values, got {len}");
    }
    Ok(len.trailing_zeros() as usize)
}

/// Total number of stages, the input processor included (`log2(len) + 1`).
pub fn processor_count(len: usize) -> Result<usize> {
    Ok(merge_stage_count(len)? + 1)
}

/// Sorts `values` ascending by pushing them through the merge pipeline.
///
/// # Errors
/// Fails when the length is not a power of two, or when a stage stops early
/// (lost neighbour or panic).
pub fn pipeline_merge_sort(values: &[u8]) -> Result<Vec<u8>> {
    let stages = merge_stage_count(values.len())?;
    if stages == 0 {
        return Ok(values.to_vec());
    }
    let total = values.len();
    debug!(total, processors = processor_count(total)?, "starting pipeline");

    thread::scope(|scope| -> Result<Vec<u8>> {
        let (feed_tx, mut upstream) = mpsc::channel();
        let mut handles = Vec::with_capacity(stages);
        for stage in 1..=stages {
            let (tx, rx) = mpsc::channel();
            let stage_input = std::mem::replace(&mut upstream, rx);
            handles.push(scope.spawn(move || merge_stage(stage, stage_input, tx, total)));
        }

        let fed = feed(values, &feed_tx);
        drop(feed_tx);

        // `upstream` is now the output of the last stage.
        let sorted: Vec<u8> = upstream.iter().map(|item| item.value).collect();

        for (offset, handle) in handles.into_iter().enumerate() {
            handle
                .join()
                .map_err(|_| anyhow!("pipeline stage {} panicked", offset + 1))??;
        }
        fed?;

        if sorted.len() != total {
            bail!(
                "pipeline delivered {} values, expected {total}",
                sorted.len()
            );
        }
        Ok(sorted)
    })
}

/// Stage 0: sends the input from the back, alternating the queue tag.
fn feed(values: &[u8], downstream: &Sender<Item>) -> Result<()> {
    for (position, &value) in values.iter().rev().enumerate() {
        downstream
            .send(Item {
                queue: Queue::for_position(position),
                value,
            })
            .map_err(|_| anyhow!("pipeline stage 1 stopped accepting input"))?;
    }
    Ok(())
}

/// Merging stage `stage` (1-based): merges runs of `2^(stage-1)` values.
fn merge_stage(
    stage: usize,
    upstream: Receiver<Item>,
    downstream: Sender<Item>,
    total: usize,
) -> Result<()> {
    let run_len = 1usize << (stage - 1);
    let mut queues = [
        VecDeque::with_capacity(run_len),
        VecDeque::with_capacity(run_len),
    ];
    let mut processed = 0;
    let mut block = 0;

    while processed < total {
        // Queue roles swap every block.
        let first = Queue::for_position(block);
        let second = first.other();

        // Merging only starts once the first run is complete.
        fill(stage, &upstream, &mut queues, first, run_len)?;
        fill(stage, &upstream, &mut queues, second, 1)?;

        let mut taken = [0usize; 2];
        while taken[first.index()] < run_len || taken[second.index()] < run_len {
            let from = if taken[first.index()] == run_len {
                second
            } else if taken[second.index()] == run_len {
                first
            } else {
                fill(stage, &upstream, &mut queues, second, 1)?;
                match (queues[first.index()].front(), queues[second.index()].front()) {
                    (Some(a), Some(b)) if a < b => first,
                    (Some(_), Some(_)) => second,
                    _ => bail!("pipeline stage {stage} ran out of values mid-merge"),
                }
            };

            fill(stage, &upstream, &mut queues, from, 1)?;
            let Some(value) = queues[from.index()].pop_front() else {
                bail!("pipeline stage {stage} ran out of values mid-merge");
            };
            taken[from.index()] += 1;

            downstream
                .send(Item {
                    queue: first,
                    value,
                })
                .map_err(|_| anyhow!("pipeline stage {stage} lost its downstream"))?;
        }

        processed += 2 * run_len;
        block += 1;
    }

    trace!(stage, blocks = block, "stage finished");
    Ok(())
}

/// Receives from upstream until `queue` holds at least `min_len` values.
fn fill(
    stage: usize,
    upstream: &Receiver<Item>,
    queues: &mut [VecDeque<u8>; 2],
    queue: Queue,
    min_len: usize,
) -> Result<()> {
    while queues[queue.index()].len() < min_len {
        let item = upstream.recv().map_err(|_| {
            anyhow!("pipeline stage {stage} lost its upstream before the input was complete")
        })?;
        trace!(stage, value = item.value, queue = ?item.queue, "received");
        queues[item.queue.index()].push_back(item.value);
    }
    Ok(())
}
