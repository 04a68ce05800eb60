//! Chunked batch processing over a worker pool.
//!
//! A word list is cut into fixed-size chunks that workers pull from a
//! bounded queue; each worker analyzes its chunk sequentially and ships the
//! produced records to a collector. The analyzer is immutable after load,
//! so workers share it by plain borrow. The interleaving of worker outputs
//! is not observable: the collector sorts the flat result before returning.

use std::sync::mpsc;
use std::sync::Mutex;
use std::thread;

use crate::analyzer::MorphAnalyzer;
use crate::tagset::Parsed;

/// Number of words handed to a worker at a time.
const CHUNK_SIZE: usize = 1000;

impl MorphAnalyzer {
    /// Analyzes a word list and returns every parse, sorted ascending by
    /// surface word.
    ///
    /// Out-of-vocabulary words contribute their predicted parses, exactly
    /// as [`analyze`](Self::analyze) does per word.
    pub fn parse_list<S>(&self, words: &[S]) -> Vec<Parsed>
    where
        S: AsRef<str> + Sync,
    {
        self.process_chunked(words, |analyzer, word| analyzer.analyze(word).0)
    }

    /// Analyzes a word list and returns every generated surface form,
    /// sorted ascending by surface word.
    pub fn inflect_list<S>(&self, words: &[S]) -> Vec<Parsed>
    where
        S: AsRef<str> + Sync,
    {
        self.process_chunked(words, |analyzer, word| analyzer.analyze(word).1)
    }

    fn process_chunked<S, F>(&self, words: &[S], per_word: F) -> Vec<Parsed>
    where
        S: AsRef<str> + Sync,
        F: Fn(&Self, &str) -> Vec<Parsed> + Sync,
    {
        if words.is_empty() {
            return Vec::new();
        }

        let num_chunks = words.len().div_ceil(CHUNK_SIZE);
        let workers = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(num_chunks);

        let (chunk_tx, chunk_rx) = mpsc::sync_channel::<&[S]>(workers);
        let chunk_rx = Mutex::new(chunk_rx);
        let (result_tx, result_rx) = mpsc::channel::<Vec<Parsed>>();

        let mut collected = Vec::with_capacity(words.len());
        thread::scope(|scope| {
            for _ in 0..workers {
                let result_tx = result_tx.clone();
                let chunk_rx = &chunk_rx;
                let per_word = &per_word;
                scope.spawn(move || loop {
                    // Hold the lock only for the queue pop.
                    let message = match chunk_rx.lock() {
                        Ok(receiver) => receiver.recv(),
                        Err(_) => break,
                    };
                    let Ok(chunk) = message else { break };

                    let mut produced = Vec::with_capacity(chunk.len());
                    for word in chunk {
                        produced.extend(per_word(self, word.as_ref()));
                    }
                    if result_tx.send(produced).is_err() {
                        break;
                    }
                });
            }

            // Dispatch: blocks whenever all workers are busy and the queue
            // is full. Closing the queue ends the workers' pull loops.
            for chunk in words.chunks(CHUNK_SIZE) {
                if chunk_tx.send(chunk).is_err() {
                    break;
                }
            }
            drop(chunk_tx);
            drop(result_tx);

            while let Ok(mut produced) = result_rx.recv() {
                collected.append(&mut produced);
            }
        });

        collected.sort_by(|a, b| a.word.cmp(&b.word));
        collected
    }
}
