use crate::{
    config::ValidatorConfig,
    model::{FieldKind, ModelRegistry, RecordModel},
    obs::sink::{self, MetricsEvent},
    record::{FieldValue, Record},
    snapshot::Snapshot,
    validate::{
        Issue, Mutation, Notice, allowed::ValidationOutcome, evaluate, narrow,
        structure::{self, StructuralError},
    },
    visitor::{PathSegment, render_path},
};
use std::collections::BTreeMap;

///
/// Session
///
/// State for one validation run over one record tree. Trial validation
/// during narrowing runs in its own session so a failed attempt leaves no
/// trace in the caller's issues.
///

pub(crate) struct Session<'a> {
    pub(crate) registry: &'a ModelRegistry,
    config: &'a ValidatorConfig,
    path: Vec<PathSegment>,
    depth: usize,
    issues: BTreeMap<String, Vec<Issue>>,
    notices: Vec<Notice>,
    mutations: Vec<Mutation>,
}

///
/// Trial
/// Outcome of a successful trial validation.
///

pub(crate) struct Trial {
    pub(crate) record: Record,
    notices: Vec<Notice>,
    mutations: Vec<Mutation>,
}

impl<'a> Session<'a> {
    pub(crate) const fn new(registry: &'a ModelRegistry, config: &'a ValidatorConfig) -> Self {
        Self {
            registry,
            config,
            path: Vec::new(),
            depth: 0,
            issues: BTreeMap::new(),
            notices: Vec::new(),
            mutations: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> (BTreeMap<String, Vec<Issue>>, Vec<Notice>, Vec<Mutation>) {
        (self.issues, self.notices, self.mutations)
    }

    // ------------------------------------------------------------------
    // logging / bookkeeping
    // ------------------------------------------------------------------

    pub(crate) fn debug_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[debug] {}", s.as_ref());
        }
    }

    fn warn_log(&self, s: impl AsRef<str>) {
        if self.config.debug {
            println!("[warn] {}", s.as_ref());
        }
    }

    /// Key of the current record, or of one of its fields (and list slot).
    pub(crate) fn key(&self, field: Option<&'static str>, index: Option<usize>) -> String {
        let mut path = self.path.clone();
        path.extend(field.map(PathSegment::Field));
        path.extend(index.map(PathSegment::Index));

        render_path(&path, None)
    }

    pub(crate) fn add_issue(&mut self, key: String, issue: Issue) {
        self.issues.entry(key).or_default().push(issue);
    }

    pub(crate) fn structural(
        &mut self,
        model_path: &'static str,
        key: String,
        err: StructuralError,
    ) {
        sink::record(MetricsEvent::StructuralViolation {
            record_path: model_path,
        });
        self.debug_log(format!("structural violation at '{key}': {err}"));
        self.add_issue(key, Issue::StructuralViolation(err));
    }

    pub(crate) fn mutate(&mut self, mutation: Mutation) {
        self.mutations.push(mutation);
    }

    fn notice(&mut self, notice: Notice) {
        if !self.notices.contains(&notice) {
            self.notices.push(notice);
        }
    }

    // ------------------------------------------------------------------
    // traversal
    // ------------------------------------------------------------------

    /// Validate one record and everything below it. Returns `false` when
    /// any issue was recorded for this subtree.
    pub(crate) fn visit_record(&mut self, record: &mut Record) -> bool {
        let here = self.key(None, None);

        if self.depth >= self.config.max_depth {
            let err = StructuralError::DepthExceeded {
                max_depth: self.config.max_depth,
            };
            self.add_issue(here, Issue::StructuralViolation(err));
            return false;
        }

        let registry = self.registry;
        let Some(model) = registry.get(record.path) else {
            let err = StructuralError::UnknownRecordType {
                path: record.path.to_string(),
            };
            self.add_issue(here, Issue::StructuralViolation(err));
            return false;
        };

        self.depth += 1;
        let ok = self.visit_model(record, model);
        self.depth -= 1;

        ok
    }

    fn visit_model(&mut self, record: &mut Record, model: &'a RecordModel) -> bool {
        sink::record(MetricsEvent::RecordValidated {
            record_path: model.path,
        });
        self.debug_log(format!(
            "validate {} at '{}' (depth {})",
            model.path,
            self.key(None, None),
            self.depth
        ));

        let structured = structure::check(self, record, model);
        let children = self.visit_children(record, model);
        if !structured {
            return false;
        }

        let mut ok = children;
        ok &= self.check_allowed_values(record, model);
        ok &= self.run_custom_checks(record, model);

        // narrowing trial-validates child data, so it needs sound children
        if ok {
            ok = narrow::narrow_record(self, record, model);
        }

        ok
    }

    fn visit_children(&mut self, record: &mut Record, model: &RecordModel) -> bool {
        let mut ok = true;

        for field in &model.fields {
            let FieldKind::Record(_) = field.kind else {
                continue;
            };
            let Some(value) = record.fields.get_mut(field.name) else {
                continue;
            };

            self.path.push(PathSegment::Field(field.name));
            match value {
                FieldValue::Record(child) => ok &= self.visit_record(child),
                FieldValue::List(items) => {
                    for (i, item) in items.iter_mut().enumerate() {
                        if let FieldValue::Record(child) = item {
                            self.path.push(PathSegment::Index(i));
                            ok &= self.visit_record(child);
                            self.path.pop();
                        }
                    }
                }
                FieldValue::Scalar(_) => {}
            }
            self.path.pop();
        }

        ok
    }

    fn check_allowed_values(&mut self, record: &Record, model: &RecordModel) -> bool {
        let snapshot = Snapshot::of(record);
        let eval = evaluate(
            &snapshot,
            &model.rules,
            &model.groups,
            self.config.deprecated,
        );

        for hit in eval.deprecations {
            let path = self.key(Some(hit.field), None);

            sink::record(MetricsEvent::Deprecation {
                record_path: model.path,
            });
            self.warn_log(format!(
                "deprecated value {} at '{path}' ({}); use \"{}\"",
                hit.value, model.path, hit.replacement
            ));
            self.notice(Notice::Deprecated {
                path,
                record: model.path,
                value: hit.value,
                replacement: hit.replacement,
            });
        }

        match eval.outcome {
            ValidationOutcome::Valid => true,
            ValidationOutcome::Invalid(failures) => {
                let here = self.key(None, None);
                for failure in failures {
                    sink::record(MetricsEvent::GroupFailed {
                        record_path: model.path,
                    });
                    self.debug_log(format!("{} at '{here}': {failure}", model.path));
                    self.add_issue(here.clone(), Issue::AllowedValueViolation(failure));
                }

                false
            }
        }
    }

    fn run_custom_checks(&mut self, record: &Record, model: &RecordModel) -> bool {
        let mut ok = true;

        for check in &model.checks {
            if let Err(message) = check.run(record) {
                sink::record(MetricsEvent::CustomCheckFailed {
                    record_path: model.path,
                });
                let here = self.key(None, None);
                self.add_issue(
                    here,
                    Issue::CustomCheckFailure {
                        check: check.name,
                        message,
                    },
                );
                ok = false;
            }
        }

        ok
    }

    // ------------------------------------------------------------------
    // trial validation
    // ------------------------------------------------------------------

    /// Validate `record` in an isolated session at the current depth.
    pub(crate) fn trial(&self, record: Record) -> Result<Trial, BTreeMap<String, Vec<Issue>>> {
        let mut session = Self {
            registry: self.registry,
            config: self.config,
            path: Vec::new(),
            depth: self.depth,
            issues: BTreeMap::new(),
            notices: Vec::new(),
            mutations: Vec::new(),
        };
        let mut record = record;

        if session.visit_record(&mut record) && session.issues.is_empty() {
            Ok(Trial {
                record,
                notices: session.notices,
                mutations: session.mutations,
            })
        } else {
            Err(session.issues)
        }
    }

    /// Adopt a successful trial at `key`, returning the narrowed record.
    pub(crate) fn adopt(&mut self, key: &str, from: &'static str, trial: Trial) -> Record {
        sink::record(MetricsEvent::NarrowSubstituted {
            from,
            to: trial.record.path,
        });
        self.debug_log(format!("narrowed '{key}': {from} -> {}", trial.record.path));

        for notice in trial.notices {
            self.notice(notice.rebase(key));
        }
        for mutation in trial.mutations {
            self.mutate(mutation.rebase(key));
        }
        self.mutate(Mutation::Narrowed {
            path: key.to_string(),
            from,
            to: trial.record.path,
        });

        trial.record
    }
}
