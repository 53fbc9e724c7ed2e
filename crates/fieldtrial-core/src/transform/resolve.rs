//! Per-entry validation and platform selection
//!
//! Every entry of a trial is resolved before any selection happens, so an
//! unknown tag fails the run even when it sits in an entry that would never
//! have been picked.

use super::context::SchemaPath;
use crate::config::{Experiment, PlatformConfig};
use crate::error::{Error, Result, SchemaViolation, Violation};
use crate::symbols::{FormFactor, OptionalBool, Platform, UnknownTag};
use std::str::FromStr;

/// A platform config with its tags mapped through the symbol tables
#[derive(Debug)]
pub(crate) struct ResolvedEntry<'a> {
    pub index: usize,
    pub platforms: Vec<Platform>,
    pub form_factors: Vec<FormFactor>,
    pub is_low_end_device: OptionalBool,
    pub experiments: &'a [Experiment],
}

impl ResolvedEntry<'_> {
    pub fn targets(&self, platform: Platform) -> bool {
        self.platforms.contains(&platform)
    }
}

/// Resolve every entry of a trial, failing on the first violation
pub(crate) fn resolve_trial<'a>(
    entries: &'a [PlatformConfig],
    path: &SchemaPath,
) -> Result<Vec<ResolvedEntry<'a>>> {
    if entries.is_empty() {
        return Err(empty_collection(path, "trial has no platform configs", "platform config"));
    }
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| resolve_entry(index, entry, &path.index(index)))
        .collect()
}

/// First entry whose platform set contains `platform`
pub(crate) fn select<'r, 'a>(
    entries: &'r [ResolvedEntry<'a>],
    platform: Platform,
) -> Option<&'r ResolvedEntry<'a>> {
    entries.iter().find(|entry| entry.targets(platform))
}

fn resolve_entry<'a>(
    index: usize,
    entry: &'a PlatformConfig,
    path: &SchemaPath,
) -> Result<ResolvedEntry<'a>> {
    let platforms_path = path.child("platforms");
    if entry.platforms.is_empty() {
        return Err(empty_collection(&platforms_path, "platform config declares no platforms", "platform"));
    }
    let platforms = map_tags::<Platform>(&entry.platforms, &platforms_path, "platform_tag")?;
    let form_factors = map_tags::<FormFactor>(&entry.form_factors, &path.child("form_factors"), "form_factor_tag")?;

    if entry.experiments.is_empty() {
        return Err(empty_collection(
            &path.child("experiments"),
            "platform config declares no experiments",
            "experiment",
        ));
    }

    Ok(ResolvedEntry {
        index,
        platforms,
        form_factors,
        is_low_end_device: entry.is_low_end_device.into(),
        experiments: &entry.experiments,
    })
}

fn map_tags<T>(tags: &[String], path: &SchemaPath, rule: &str) -> Result<Vec<T>>
where
    T: FromStr<Err = UnknownTag>,
{
    tags.iter()
        .enumerate()
        .map(|(i, tag)| tag.parse::<T>().map_err(|err| unknown_tag(path.index(i).as_str(), rule, err)))
        .collect()
}

pub(crate) fn unknown_tag(path: &str, rule: &str, err: UnknownTag) -> Error {
    Error::SchemaViolation(
        SchemaViolation::new(path, err.to_string())
            .with_violation(Violation::new(rule, format!("one of: {}", err.accepted_list()), err.tag)),
    )
}

fn empty_collection(path: &SchemaPath, message: &str, item: &str) -> Error {
    Error::SchemaViolation(SchemaViolation::new(path.as_str(), message).with_violation(
        Violation::new("non_empty", format!("at least one {}", item), "an empty list"),
    ))
}
