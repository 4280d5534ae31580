//! Arena-backed region and parameter trees.
//!
//! The store owns every node; the rest of the crate refers to nodes through
//! the copyable [`RegionId`] and [`ParameterId`] handles. Access-state
//! tracking (read in aggregate, written as a leaf, region aggregated) lives
//! here so that structural locks are enforced in one place.

use std::collections::BTreeMap;

use helios_time::Time;
use tracing::debug;

use crate::error::ParameterError;
use crate::path::{Path, PATH_SEPARATOR};
use crate::types::{GenericValue, ParameterInfo, ParameterType, RegionInfo};

/// Handle to a region node within a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

/// Handle to a parameter node within a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterId(usize);

/// How a parameter node has been accessed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum AccessState {
    #[default]
    Unset,
    Read,
    Written,
    ReadWritten,
}

impl AccessState {
    fn mark_read(self) -> Self {
        match self {
            AccessState::Unset | AccessState::Read => AccessState::Read,
            AccessState::Written | AccessState::ReadWritten => AccessState::ReadWritten,
        }
    }

    fn mark_written(self) -> Self {
        match self {
            AccessState::Unset | AccessState::Written => AccessState::Written,
            AccessState::Read | AccessState::ReadWritten => AccessState::ReadWritten,
        }
    }

    pub(crate) fn was_read(self) -> bool {
        matches!(self, AccessState::Read | AccessState::ReadWritten)
    }

    pub(crate) fn was_written(self) -> bool {
        matches!(self, AccessState::Written | AccessState::ReadWritten)
    }
}

/// Raw data held by a leaf parameter, in the node's established unit.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum ParameterData {
    #[default]
    Empty,
    Scalar(f64),
    Timeseries(Vec<f64>),
    Generic(GenericValue),
}

#[derive(Debug)]
pub(crate) struct RegionNode {
    pub(crate) name: String,
    pub(crate) parent: Option<RegionId>,
    pub(crate) children: BTreeMap<String, RegionId>,
    pub(crate) parameters: BTreeMap<String, ParameterId>,
    pub(crate) aggregated: bool,
}

#[derive(Debug)]
pub(crate) struct ParameterNode {
    pub(crate) name: String,
    pub(crate) parent: Option<ParameterId>,
    pub(crate) children: BTreeMap<String, ParameterId>,
    pub(crate) region: RegionId,
    pub(crate) data: ParameterData,
    pub(crate) unit: Option<String>,
    pub(crate) parameter_type: Option<ParameterType>,
    pub(crate) time_points: Option<Vec<Time>>,
    pub(crate) version: u64,
    pub(crate) access: AccessState,
}

/// The region and parameter trees of one parameter set.
#[derive(Debug)]
pub(crate) struct Store {
    regions: Vec<RegionNode>,
    parameters: Vec<ParameterNode>,
    root: RegionId,
}

impl Store {
    pub(crate) fn new(root_name: &str) -> Self {
        let root = RegionNode {
            name: root_name.to_string(),
            parent: None,
            children: BTreeMap::new(),
            parameters: BTreeMap::new(),
            aggregated: false,
        };
        Store {
            regions: vec![root],
            parameters: Vec::new(),
            root: RegionId(0),
        }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> RegionId {
        self.root
    }

    pub(crate) fn root_name(&self) -> &str {
        &self.regions[self.root.0].name
    }

    #[cfg(test)]
    pub(crate) fn region(&self, id: RegionId) -> &RegionNode {
        &self.regions[id.0]
    }

    pub(crate) fn parameter(&self, id: ParameterId) -> &ParameterNode {
        &self.parameters[id.0]
    }

    /// Looks up a region, creating missing nodes along the way.
    ///
    /// The first path segment must name the root region. Creating a new
    /// subregion anywhere below an aggregated region fails.
    pub(crate) fn get_or_create_region(&mut self, path: &Path) -> Result<RegionId, ParameterError> {
        if path.is_empty() {
            return Err(ParameterError::NoRegionName);
        }
        let segments = path.segments();
        if segments[0] != self.root_name() {
            return Err(ParameterError::RootRegionMismatch {
                requested: segments[0].clone(),
                root: self.root_name().to_string(),
            });
        }
        let mut current = self.root;
        let mut aggregated = self.regions[current.0].aggregated;
        for segment in &segments[1..] {
            if let Some(&child) = self.regions[current.0].children.get(segment) {
                current = child;
                aggregated |= self.regions[current.0].aggregated;
                continue;
            }
            if aggregated {
                return Err(ParameterError::RegionAggregated {
                    region: path.to_string(),
                });
            }
            let id = RegionId(self.regions.len());
            self.regions.push(RegionNode {
                name: segment.clone(),
                parent: Some(current),
                children: BTreeMap::new(),
                parameters: BTreeMap::new(),
                aggregated: false,
            });
            self.regions[current.0].children.insert(segment.clone(), id);
            debug!(region = %self.region_name_string(id), "created region");
            current = id;
        }
        Ok(current)
    }

    /// Looks up an existing region without creating anything.
    pub(crate) fn get_region(&self, path: &Path) -> Option<RegionId> {
        if path.is_empty() {
            return None;
        }
        let segments = path.segments();
        if segments[0] != self.root_name() {
            return None;
        }
        let mut current = self.root;
        for segment in &segments[1..] {
            current = *self.regions[current.0].children.get(segment)?;
        }
        Some(current)
    }

    pub(crate) fn region_full_name(&self, id: RegionId) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(region) = current {
            segments.push(self.regions[region.0].name.clone());
            current = self.regions[region.0].parent;
        }
        segments.reverse();
        segments
    }

    pub(crate) fn region_name_string(&self, id: RegionId) -> String {
        self.region_full_name(id).join(&PATH_SEPARATOR.to_string())
    }

    pub(crate) fn region_info(&self, id: RegionId) -> RegionInfo {
        let node = &self.regions[id.0];
        RegionInfo {
            name: node.name.clone(),
            full_name: self.region_full_name(id),
            aggregated: node.aggregated,
        }
    }

    /// Marks a region as aggregated over, freezing its set of subregions.
    pub(crate) fn attempt_region_aggregate(&mut self, id: RegionId) {
        self.regions[id.0].aggregated = true;
    }

    /// Looks up a parameter within a region, creating missing nodes.
    ///
    /// Creating a new child fails if any existing parameter along the path
    /// has already been written as a leaf or read in aggregate. A path that
    /// resolves entirely to existing nodes never fails.
    pub(crate) fn get_or_create_parameter(
        &mut self,
        region: RegionId,
        path: &Path,
    ) -> Result<ParameterId, ParameterError> {
        if path.is_empty() {
            return Err(ParameterError::NoParameterName);
        }
        let segments = path.segments();
        let mut written_seen = false;
        let mut read_seen = false;
        let mut current: Option<ParameterId> = None;
        for segment in segments {
            let existing = match current {
                None => self.regions[region.0].parameters.get(segment).copied(),
                Some(parent) => self.parameters[parent.0].children.get(segment).copied(),
            };
            if let Some(id) = existing {
                written_seen |= self.parameters[id.0].access.was_written();
                read_seen |= self.parameters[id.0].access.was_read();
                current = Some(id);
                continue;
            }
            if written_seen {
                return Err(ParameterError::Written {
                    parameter: path.to_string(),
                });
            }
            if read_seen {
                return Err(ParameterError::Read {
                    parameter: path.to_string(),
                });
            }
            let id = ParameterId(self.parameters.len());
            self.parameters.push(ParameterNode {
                name: segment.clone(),
                parent: current,
                children: BTreeMap::new(),
                region,
                data: ParameterData::Empty,
                unit: None,
                parameter_type: None,
                time_points: None,
                version: 0,
                access: AccessState::Unset,
            });
            match current {
                None => {
                    self.regions[region.0].parameters.insert(segment.clone(), id);
                }
                Some(parent) => {
                    self.parameters[parent.0].children.insert(segment.clone(), id);
                }
            }
            current = Some(id);
        }
        // The loop ran at least once, so current is set.
        current.ok_or(ParameterError::NoParameterName)
    }

    /// Looks up an existing parameter without creating anything.
    pub(crate) fn get_parameter(&self, region: RegionId, path: &Path) -> Option<ParameterId> {
        if path.is_empty() {
            return None;
        }
        let segments = path.segments();
        let mut current = *self.regions[region.0].parameters.get(&segments[0])?;
        for segment in &segments[1..] {
            current = *self.parameters[current.0].children.get(segment)?;
        }
        Some(current)
    }

    pub(crate) fn parameter_full_name(&self, id: ParameterId) -> Vec<String> {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(parameter) = current {
            segments.push(self.parameters[parameter.0].name.clone());
            current = self.parameters[parameter.0].parent;
        }
        segments.reverse();
        segments
    }

    pub(crate) fn parameter_name_string(&self, id: ParameterId) -> String {
        self.parameter_full_name(id)
            .join(&PATH_SEPARATOR.to_string())
    }

    pub(crate) fn parameter_info(&self, id: ParameterId) -> ParameterInfo {
        let node = &self.parameters[id.0];
        ParameterInfo {
            name: self.parameter_full_name(id),
            region: self.region_full_name(node.region),
            unit: node.unit.clone(),
            parameter_type: node.parameter_type,
        }
    }

    /// Establishes or checks the node's type for a read and marks it read.
    ///
    /// The first access fixes the node's type, unit and time grid. The read
    /// marker propagates to all ancestors, so no new sibling can be inserted
    /// anywhere along the path afterwards. A type established as generic
    /// rejects reads on nodes with children, since generic values cannot be
    /// summed.
    pub(crate) fn attempt_read(
        &mut self,
        id: ParameterId,
        requested: ParameterType,
        unit: Option<&str>,
        time_points: Option<&[Time]>,
    ) -> Result<(), ParameterError> {
        self.check_or_establish_type(id, requested, unit)?;
        let node = &mut self.parameters[id.0];
        if node.time_points.is_none() {
            node.time_points = time_points.map(<[Time]>::to_vec);
        }
        let mut current = Some(id);
        while let Some(parameter) = current {
            let node = &mut self.parameters[parameter.0];
            node.access = node.access.mark_read();
            current = node.parent;
        }
        if requested == ParameterType::Generic && !self.parameters[id.0].children.is_empty() {
            return Err(ParameterError::Aggregation {
                parameter: self.parameter_name_string(id),
            });
        }
        Ok(())
    }

    /// Establishes or checks the node's type for a write.
    ///
    /// Nodes with children are aggregates and reject direct writes. The node
    /// is marked written here, when the writer claims it, so a live writer
    /// forbids turning its leaf into an aggregate before any data arrives.
    pub(crate) fn attempt_write(
        &mut self,
        id: ParameterId,
        requested: ParameterType,
        unit: Option<&str>,
    ) -> Result<(), ParameterError> {
        if !self.parameters[id.0].children.is_empty() {
            return Err(ParameterError::Readonly {
                parameter: self.parameter_name_string(id),
            });
        }
        self.check_or_establish_type(id, requested, unit)?;
        let node = &mut self.parameters[id.0];
        node.access = node.access.mark_written();
        Ok(())
    }

    /// Stores leaf data, overwriting the node's time grid with the writer's,
    /// and bumps the version of the node and all its ancestors.
    pub(crate) fn write_data(
        &mut self,
        id: ParameterId,
        data: ParameterData,
        time_points: Option<Vec<Time>>,
    ) {
        let node = &mut self.parameters[id.0];
        node.data = data;
        if time_points.is_some() {
            node.time_points = time_points;
        }
        node.access = node.access.mark_written();
        let mut current = Some(id);
        while let Some(parameter) = current {
            self.parameters[parameter.0].version += 1;
            current = self.parameters[parameter.0].parent;
        }
        debug!(parameter = %self.parameter_name_string(id), "wrote parameter data");
    }

    /// Combined version of a node, counting writes to it and its subtree.
    pub(crate) fn version(&self, id: ParameterId) -> u64 {
        self.parameters[id.0].version
    }

    /// Leaf descendants of a node in depth-first order. A node without
    /// children is its own single leaf.
    pub(crate) fn leaves(&self, id: ParameterId) -> Vec<ParameterId> {
        let mut leaves = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.parameters[current.0];
            if node.children.is_empty() {
                leaves.push(current);
            } else {
                // Reverse keeps depth-first order name-ascending.
                stack.extend(node.children.values().rev().copied());
            }
        }
        leaves
    }

    fn check_or_establish_type(
        &mut self,
        id: ParameterId,
        requested: ParameterType,
        unit: Option<&str>,
    ) -> Result<(), ParameterError> {
        let established = self.parameters[id.0].parameter_type;
        match established {
            None => {
                let node = &mut self.parameters[id.0];
                node.parameter_type = Some(requested);
                if node.unit.is_none() {
                    node.unit = unit.map(str::to_string);
                }
                Ok(())
            }
            Some(actual) if actual != requested => Err(ParameterError::Type {
                parameter: self.parameter_name_string(id),
                actual,
                requested,
            }),
            Some(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_creation_and_lookup() {
        let mut store = Store::new("World");
        assert_eq!(store.get_or_create_region(&Path::from("World")).unwrap(), store.root());

        let deu = store
            .get_or_create_region(&Path::from(["World", "DEU"]))
            .unwrap();
        let ber = store
            .get_or_create_region(&Path::from("World|DEU|BER"))
            .unwrap();
        assert_eq!(store.region_full_name(ber), ["World", "DEU", "BER"]);
        assert_eq!(store.region(ber).parent, Some(deu));
        assert_eq!(store.get_region(&Path::from("World|DEU|BER")), Some(ber));
        assert_eq!(store.get_region(&Path::from("INVALID|DEU|BER")), None);
    }

    #[test]
    fn empty_region_name_is_rejected() {
        let mut store = Store::new("World");
        assert_eq!(
            store.get_or_create_region(&Path::from("")),
            Err(ParameterError::NoRegionName)
        );
    }

    #[test]
    fn root_region_mismatch() {
        let mut store = Store::new("World");
        let err = store.get_or_create_region(&Path::from("Earth")).unwrap_err();
        assert_eq!(
            err,
            ParameterError::RootRegionMismatch {
                requested: "Earth".to_string(),
                root: "World".to_string(),
            }
        );
    }

    #[test]
    fn aggregated_region_rejects_new_subregions() {
        let mut store = Store::new("World");
        store
            .get_or_create_region(&Path::from("World|DEU|BER"))
            .unwrap();
        let deu = store.get_region(&Path::from("World|DEU")).unwrap();
        store.attempt_region_aggregate(deu);

        let err = store
            .get_or_create_region(&Path::from("World|DEU|BRB"))
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::RegionAggregated {
                region: "World|DEU|BRB".to_string(),
            }
        );
        // Existing subregions remain reachable.
        assert!(store.get_region(&Path::from("World|DEU|BER")).is_some());
    }

    #[test]
    fn parameter_creation_and_metadata() {
        let mut store = Store::new("World");
        let ber = store
            .get_or_create_region(&Path::from("World|DEU|BER"))
            .unwrap();

        assert_eq!(
            store.get_or_create_parameter(ber, &Path::from("")),
            Err(ParameterError::NoParameterName)
        );

        let co2 = store
            .get_or_create_parameter(ber, &Path::from(["Emissions", "CO2"]))
            .unwrap();
        assert_eq!(store.parameter_full_name(co2), ["Emissions", "CO2"]);
        assert_eq!(store.parameter(co2).name, "CO2");
        assert_eq!(
            store.get_parameter(ber, &Path::from("Emissions|CO2")),
            Some(co2)
        );
        assert_eq!(store.get_parameter(ber, &Path::from("Emissions|NOx")), None);

        let info = store.parameter_info(co2);
        assert_eq!(info.name, ["Emissions", "CO2"]);
        assert_eq!(info.region, ["World", "DEU", "BER"]);
        assert_eq!(info.unit, None);
        assert_eq!(info.parameter_type, None);
    }

    #[test]
    fn read_establishes_type_and_unit() {
        let mut store = Store::new("World");
        let root = store.root();
        let industry = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();

        store
            .attempt_read(
                industry,
                ParameterType::AverageTimeseries,
                Some("GtCO2/a"),
                Some(&[0]),
            )
            .unwrap();
        assert_eq!(
            store.parameter(industry).parameter_type,
            Some(ParameterType::AverageTimeseries)
        );
        assert_eq!(store.parameter(industry).unit.as_deref(), Some("GtCO2/a"));
    }

    #[test]
    fn conflicting_type_is_rejected() {
        let mut store = Store::new("World");
        let root = store.root();
        let co2 = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2"))
            .unwrap();
        store
            .attempt_read(co2, ParameterType::AverageTimeseries, Some("GtCO2/a"), Some(&[0]))
            .unwrap();

        let err = store
            .attempt_read(co2, ParameterType::Scalar, Some("GtCO2/a"), None)
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::Type {
                parameter: "Emissions|CO2".to_string(),
                actual: ParameterType::AverageTimeseries,
                requested: ParameterType::Scalar,
            }
        );
    }

    #[test]
    fn aggregate_parameter_rejects_direct_writes() {
        let mut store = Store::new("World");
        let root = store.root();
        store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        let co2 = store
            .get_parameter(root, &Path::from("Emissions|CO2"))
            .unwrap();

        let err = store
            .attempt_write(co2, ParameterType::AverageTimeseries, Some("GtCO2/a"))
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::Readonly {
                parameter: "Emissions|CO2".to_string(),
            }
        );
    }

    #[test]
    fn read_parameter_locks_out_new_children() {
        let mut store = Store::new("World");
        let root = store.root();
        store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        let co2 = store
            .get_parameter(root, &Path::from("Emissions|CO2"))
            .unwrap();
        store
            .attempt_read(co2, ParameterType::AverageTimeseries, Some("GtCO2/a"), Some(&[0]))
            .unwrap();

        let err = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Landuse"))
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::Read {
                parameter: "Emissions|CO2|Landuse".to_string(),
            }
        );
        // Resolving existing nodes is still fine.
        assert!(store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2"))
            .is_ok());
    }

    #[test]
    fn leaf_read_propagates_lock_to_ancestors() {
        let mut store = Store::new("World");
        let root = store.root();
        let industry = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        store
            .attempt_read(
                industry,
                ParameterType::AverageTimeseries,
                Some("GtCO2/a"),
                Some(&[0]),
            )
            .unwrap();

        let err = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Landuse"))
            .unwrap_err();
        assert!(matches!(err, ParameterError::Read { .. }));
    }

    #[test]
    fn written_parameter_locks_out_new_children() {
        let mut store = Store::new("World");
        let root = store.root();
        let industry = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        store
            .attempt_write(industry, ParameterType::AverageTimeseries, Some("GtCO2/a"))
            .unwrap();
        store.write_data(industry, ParameterData::Timeseries(vec![1.0]), Some(vec![0, 1]));

        let err = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry|Other"))
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::Written {
                parameter: "Emissions|CO2|Industry|Other".to_string(),
            }
        );
    }

    #[test]
    fn claiming_a_writer_locks_out_new_children_before_data_arrives() {
        let mut store = Store::new("World");
        let root = store.root();
        let industry = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        store
            .attempt_write(industry, ParameterType::AverageTimeseries, Some("GtCO2/a"))
            .unwrap();

        let err = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry|Other"))
            .unwrap_err();
        assert!(matches!(err, ParameterError::Written { .. }));
    }

    #[test]
    fn written_lock_takes_precedence_over_read_lock() {
        let mut store = Store::new("World");
        let root = store.root();
        let industry = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry"))
            .unwrap();
        store
            .attempt_read(
                industry,
                ParameterType::AverageTimeseries,
                Some("GtCO2/a"),
                Some(&[0]),
            )
            .unwrap();
        store
            .attempt_write(industry, ParameterType::AverageTimeseries, Some("GtCO2/a"))
            .unwrap();
        store.write_data(industry, ParameterData::Timeseries(vec![1.0]), Some(vec![0, 1]));

        let err = store
            .get_or_create_parameter(root, &Path::from("Emissions|CO2|Industry|Other"))
            .unwrap_err();
        assert!(matches!(err, ParameterError::Written { .. }));
    }

    #[test]
    fn generic_read_on_aggregate_fails_after_fixing_type() {
        let mut store = Store::new("World");
        let root = store.root();
        store
            .get_or_create_parameter(root, &Path::from("Options|Switch"))
            .unwrap();
        let options = store.get_parameter(root, &Path::from("Options")).unwrap();

        let err = store
            .attempt_read(options, ParameterType::Generic, None, None)
            .unwrap_err();
        assert_eq!(
            err,
            ParameterError::Aggregation {
                parameter: "Options".to_string(),
            }
        );
        // The failed read still fixed the type.
        assert_eq!(
            store.parameter(options).parameter_type,
            Some(ParameterType::Generic)
        );
    }

    #[test]
    fn writes_bump_version_up_the_chain() {
        let mut store = Store::new("World");
        let root = store.root();
        let leaf = store
            .get_or_create_parameter(root, &Path::from("Top|a|1"))
            .unwrap();
        let parent = store.get_parameter(root, &Path::from("Top|a")).unwrap();
        let top = store.get_parameter(root, &Path::from("Top")).unwrap();

        assert_eq!(store.version(leaf), 0);
        store
            .attempt_write(leaf, ParameterType::Scalar, Some("dimensionless"))
            .unwrap();
        store.write_data(leaf, ParameterData::Scalar(0.6), None);
        assert_eq!(store.version(leaf), 1);
        assert_eq!(store.version(parent), 1);
        assert_eq!(store.version(top), 1);

        store.write_data(leaf, ParameterData::Scalar(0.3), None);
        assert_eq!(store.version(leaf), 2);
        assert_eq!(store.version(top), 2);
    }

    #[test]
    fn leaves_are_depth_first() {
        let mut store = Store::new("World");
        let root = store.root();
        let a1 = store
            .get_or_create_parameter(root, &Path::from("Top|a|1"))
            .unwrap();
        let a2 = store
            .get_or_create_parameter(root, &Path::from("Top|a|2"))
            .unwrap();
        let b = store
            .get_or_create_parameter(root, &Path::from("Top|b"))
            .unwrap();
        let top = store.get_parameter(root, &Path::from("Top")).unwrap();

        assert_eq!(store.leaves(top), vec![a1, a2, b]);
        assert_eq!(store.leaves(b), vec![b]);
    }
}
