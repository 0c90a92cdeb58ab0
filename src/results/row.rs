/// One benchmark observation: a single CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Query and baseline, e.g. `"NQ5 (count)"`.
    pub query_baseline: String,
    /// Process count (window logs) or dataflow count (results files).
    pub parallelism: u32,
    pub window_id: i64,
    /// Latency of this window, in seconds.
    pub latency: f64,
    /// Running average latency reported by the benchmark, in seconds.
    pub avg_latency: f64,
    /// Target input rate in events per second; results files only.
    pub throughput: Option<f64>,
    /// Set by the loader from the file name; results files only.
    pub node_count: Option<u32>,
}

/// Ordered observations of one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Observation>,
}

impl Dataset {
    pub fn new(rows: Vec<Observation>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.rows.iter()
    }

    /// Rows matching `pred`, as a new dataset.
    pub fn select(&self, pred: impl Fn(&Observation) -> bool) -> Dataset {
        Dataset::new(self.rows.iter().filter(|o| pred(*o)).cloned().collect())
    }

    /// Distinct values of a column, in first-appearance order.
    pub fn distinct<T: PartialEq>(&self, column: impl Fn(&Observation) -> Option<T>) -> Vec<T> {
        first_seen(self.rows.iter().filter_map(column))
    }

    pub fn baselines(&self) -> Vec<String> {
        self.distinct(|o| Some(o.query_baseline.clone()))
    }

    pub fn parallelisms(&self) -> Vec<u32> {
        self.distinct(|o| Some(o.parallelism))
    }

    pub fn node_counts(&self) -> Vec<u32> {
        self.distinct(|o| o.node_count)
    }

    pub fn throughputs(&self) -> Vec<f64> {
        self.distinct(|o| o.throughput)
    }
}

/// Values without repeats, in first-appearance order.
pub fn first_seen<T: PartialEq>(values: impl IntoIterator<Item = T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Observation;
    type IntoIter = std::slice::Iter<'a, Observation>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
pub(crate) fn obs(query_baseline: &str, parallelism: u32, window_id: i64, latency: f64) -> Observation {
    Observation {
        query_baseline: query_baseline.to_string(),
        parallelism,
        window_id,
        latency,
        avg_latency: latency,
        throughput: None,
        node_count: None,
    }
}
