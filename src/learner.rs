//! Model state and the public entry points of the forecasting pipeline.
//!
//! A [`ForecastLearner`] is built once from a training table. Construction
//! validates every row, derives the discretization [`Span`] and [`Schema`],
//! estimates the training [`Climatology`], and imputes every example; none of
//! that changes afterwards. Clustering may be run any number of times and
//! replaces the previous [`Partition`] only when it succeeds.

use crate::*;

/// Learns cluster-conditioned climatologies from interval-censored examples.
pub struct ForecastLearner<M: Measure = Euclidean> {
    /// Distance used for assignment and prediction
    metric: M,
    /// Training rows, in the order supplied
    examples: Vec<Example>,
    /// Outcome distribution over the full training set
    climatology: Climatology,
    /// Span and width every imputed vector shares
    schema: Schema,
    /// Imputed feature vectors, index-aligned with `examples`
    imputed: Vec<Imputed>,
    /// Latest clustering result, if any
    partition: Option<Partition>,
}

impl ForecastLearner<Euclidean> {
    /// Builds a model measuring distance with the Euclidean norm.
    pub fn new(examples: Vec<Example>) -> Result<Self> {
        Self::with_metric(examples, Euclidean)
    }
}

impl<M: Measure> ForecastLearner<M> {
    /// Builds a model with a custom distance.
    pub fn with_metric(examples: Vec<Example>, metric: M) -> Result<Self> {
        examples
            .iter()
            .enumerate()
            .try_for_each(|(row, example)| example.validate(row))?;
        let span = Span::try_from(examples.as_slice())?;
        let schema = Schema::new(span, &examples)?;
        let climatology = Climatology::from_outcomes(examples.iter().map(|e| e.outcome))?;
        log::info!("{:<32}{:<32}", "imputing examples", examples.len());
        log::info!("{:<32}{:<32}", "discretization span", span);
        log::info!("{:<32}{:<32}", "imputed dimension", schema.dimension());
        let imputation = Imputation::new(&climatology, span);
        let imputed = examples
            .iter()
            .map(|example| imputation.impute(&example.features))
            .collect::<Result<Vec<Imputed>>>()?;
        Ok(Self {
            metric,
            examples,
            climatology,
            schema,
            imputed,
            partition: None,
        })
    }

    /// Number of training examples.
    pub fn n(&self) -> usize {
        self.examples.len()
    }
    pub fn span(&self) -> Span {
        self.schema.span()
    }
    pub fn schema(&self) -> &Schema {
        &self.schema
    }
    pub fn examples(&self) -> &[Example] {
        &self.examples
    }
    /// Outcome labels, index-aligned with [`ForecastLearner::imputed`].
    pub fn outcomes(&self) -> impl Iterator<Item = Value> + '_ {
        self.examples.iter().map(|e| e.outcome)
    }
    /// Climatology over every training outcome.
    pub fn climatology(&self) -> &Climatology {
        &self.climatology
    }
    /// Imputed vectors, index-aligned with [`ForecastLearner::examples`].
    pub fn imputed(&self) -> &[Imputed] {
        &self.imputed
    }
    /// The latest clustering, or `None` before [`ForecastLearner::cluster`].
    pub fn partition(&self) -> Option<&Partition> {
        self.partition.as_ref()
    }

    /// Imputes an unseen example against the training climatology and span.
    pub fn impute(&self, features: &[Feature]) -> Result<Imputed> {
        let row = self.n();
        if features.is_empty() {
            return Err(ValidationError::EmptyExample { row }.into());
        }
        features.iter().try_for_each(Feature::validate)?;
        self.schema.check(row, features)?;
        Imputation::new(&self.climatology, self.span()).impute(features)
    }

    /// Clusters with the default [`Termination`].
    pub fn cluster<R>(&mut self, k: usize, rng: &mut R) -> Result<&Partition>
    where
        R: rand::Rng + ?Sized,
    {
        self.cluster_with(k, rng, &Termination::default())
    }

    /// Clusters with a generator seeded from `seed`.
    pub fn cluster_seeded(&mut self, k: usize, seed: u64) -> Result<&Partition> {
        use rand::SeedableRng;
        let ref mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
        self.cluster(k, rng)
    }

    /// Partitions the training examples into `k` clusters.
    ///
    /// Seeds are `k` distinct examples drawn from `rng`. On failure the
    /// previous partition, if any, is kept.
    pub fn cluster_with<R>(
        &mut self,
        k: usize,
        rng: &mut R,
        termination: &Termination,
    ) -> Result<&Partition>
    where
        R: rand::Rng + ?Sized,
    {
        if k == 0 || k > self.n() {
            return Err(Error::invalid_parameter(format!(
                "k = {} outside [1, {}]",
                k,
                self.n()
            )));
        }
        let partition = {
            let kmeans = Kmeans {
                metric: &self.metric,
                points: &self.imputed,
            };
            log::info!("{:<32}{:<32}", "kmeans initializing", k);
            let seeds = kmeans.init_kmeans(k, rng);
            log::info!("{:<32}{:<32}", "kmeans iterating", k);
            let refinement = kmeans.converge(seeds, termination)?;
            let rms = kmeans.rms(&refinement.kmeans, &refinement.assignments);
            log::info!("{:<32}{:<32}", "kmeans converged", refinement.iterations);
            log::info!("{:<32}{:<32}", "kmeans rms", rms);
            let ref outcomes = self.outcomes().collect::<Vec<Value>>();
            Partition::new(refinement, outcomes, &self.climatology, rms)?
        };
        Ok(&*self.partition.insert(partition))
    }

    /// Climatology of the cluster whose centroid is nearest to `x`.
    pub fn predict(&self, x: &[Probability]) -> Result<&Climatology> {
        let partition = self
            .partition
            .as_ref()
            .ok_or(Error::Precondition("predict called before cluster"))?;
        if x.len() != self.schema.dimension() {
            return Err(ValidationError::DimensionMismatch {
                expected: self.schema.dimension(),
                actual: x.len(),
            }
            .into());
        }
        let (j, _) = partition.nearest(&self.metric, x);
        Ok(partition.climatology(j))
    }

    /// Imputes `features`, then predicts.
    pub fn forecast(&self, features: &[Feature]) -> Result<&Climatology> {
        let ref x = self.impute(features)?;
        self.predict(x)
    }
}

/// Lloyd refinement over a learner's imputed vectors.
struct Kmeans<'a, M: Measure> {
    metric: &'a M,
    points: &'a [Imputed],
}

impl<'a, M: Measure> Lloyd for Kmeans<'a, M> {
    type P = Imputed;
    fn points(&self) -> &[Imputed] {
        self.points
    }
    fn distance(&self, x: &Imputed, y: &Imputed) -> Energy {
        self.metric.distance(x, y)
    }
    fn drift(&self, old: &Imputed, new: &Imputed) -> Energy {
        old.drift(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Example> {
        let row = |cuts: [Value; 2], masses: [Probability; 3], outcome: Value| {
            let features = vec![
                Feature::from((Interval::Below(cuts[0]), masses[0])),
                Feature::from((Interval::Bounded(cuts[0] + 1, cuts[1]), masses[1])),
                Feature::from((Interval::Above(cuts[1] + 1), masses[2])),
            ];
            Example::from((features, outcome))
        };
        vec![
            row([2, 5], [0.8, 0.2, 0.0], 1),
            row([2, 5], [0.7, 0.3, 0.0], 2),
            row([3, 5], [0.9, 0.1, 0.0], 2),
            row([2, 6], [0.0, 0.2, 0.8], 7),
            row([2, 5], [0.0, 0.1, 0.9], 8),
            row([3, 6], [0.1, 0.8, 0.1], 4),
            row([2, 5], [0.1, 0.7, 0.2], 5),
            row([2, 6], [0.0, 0.9, 0.1], 3),
            row([3, 5], [0.2, 0.6, 0.2], 6),
        ]
    }

    #[test]
    fn construction_freezes_span_and_dimension() {
        let learner = ForecastLearner::new(table()).unwrap();
        assert_eq!(learner.span(), Span { minimum: 2, maximum: 7 });
        assert_eq!(learner.schema().dimension(), 6);
        assert_eq!(learner.imputed().len(), learner.n());
        assert!(learner.imputed().iter().all(|x| x.len() == 6));
        assert!(learner.partition().is_none());
    }

    #[test]
    fn malformed_rows_fail_fast() {
        let mut rows = table();
        rows[4].features[1].mass = 1.2;
        assert!(matches!(
            ForecastLearner::new(rows),
            Err(Error::Validation(ValidationError::MassOutOfRange(_)))
        ));
        assert!(matches!(
            ForecastLearner::new(vec![]),
            Err(Error::Validation(ValidationError::EmptyTable))
        ));
    }

    #[test]
    fn predict_requires_clustering() {
        let learner = ForecastLearner::new(table()).unwrap();
        let ref x = learner.imputed()[0].clone();
        assert_eq!(
            learner.predict(x),
            Err(Error::Precondition("predict called before cluster"))
        );
    }

    #[test]
    fn cluster_count_is_bounded() {
        let mut learner = ForecastLearner::new(table()).unwrap();
        assert!(matches!(
            learner.cluster_seeded(0, 1),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(matches!(
            learner.cluster_seeded(10, 1),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(learner.partition().is_none());
    }

    #[test]
    fn failed_clustering_keeps_previous_partition() {
        let mut learner = ForecastLearner::new(table()).unwrap();
        let before = learner.cluster_seeded(3, 11).unwrap().clone();
        let ref mut rng = <rand::rngs::SmallRng as rand::SeedableRng>::seed_from_u64(11);
        let stingy = Termination::new(1, 0.).unwrap();
        assert!(matches!(
            learner.cluster_with(1, rng, &stingy),
            Err(Error::DidNotConverge { .. })
        ));
        assert_eq!(learner.partition(), Some(&before));
    }

    #[test]
    fn predict_rejects_wrong_dimension() {
        let mut learner = ForecastLearner::new(table()).unwrap();
        learner.cluster_seeded(2, 3).unwrap();
        assert_eq!(
            learner.predict(&[0.5, 0.5]),
            Err(Error::Validation(ValidationError::DimensionMismatch {
                expected: 6,
                actual: 2,
            }))
        );
    }

    #[test]
    fn forecast_imputes_then_predicts() {
        let mut learner = ForecastLearner::new(table()).unwrap();
        learner.cluster_seeded(2, 5).unwrap();
        let ref features = learner.examples()[0].features.clone();
        let x = learner.impute(features).unwrap();
        assert_eq!(&x, &learner.imputed()[0]);
        assert_eq!(learner.forecast(features), learner.predict(&x));
    }
}
