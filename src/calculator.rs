//! Ground-motion field operations
//!
//! Three entry points, each producing one field over the same site list:
//! the deterministic mean field, a stochastic field with independent
//! residuals, and a stochastic field whose intra-event residuals are
//! spatially correlated per Jayaram & Baker (2009).

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::correlated::correlated_residuals;
use crate::covariance::intra_event_covariance;
use crate::error::{FieldError, Result};
use crate::field::GroundMotionField;
use crate::gmm::{GroundMotionModel, Rupture, StdDevType};
use crate::sampler::truncated_gaussian;
use crate::site::Site;

/// Flags for the spatially correlated field.
///
/// Both choices must be written out at every call site; there is
/// deliberately no `Default`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelatedFieldOptions {
    /// Add one shared inter-event residual on top of the mean field.
    /// Turned off when isolating the intra-event correlation structure.
    pub include_inter_event: bool,
    /// Vs30 values cluster, which widens the short-period correlation
    /// range.
    pub vs30_cluster: bool,
}

/// Mean ground motion at every site, in site order.
///
/// Deterministic: no residual of any kind is added. The rupture is set
/// once and the site context is re-set before each mean read.
pub fn mean_ground_motion_field<M>(
    model: &mut M,
    rupture: Rupture,
    sites: &[Site],
) -> Result<GroundMotionField>
where
    M: GroundMotionModel + ?Sized,
{
    validate_sites(sites)?;
    debug!(sites = sites.len(), "computing mean ground-motion field");

    model.set_rupture(rupture);
    let mut field = GroundMotionField::with_capacity(sites.len());
    for site in sites {
        model.set_site(site);
        field.push(site.id, model.mean());
    }
    Ok(field)
}

/// Mean field plus independently sampled residuals.
///
/// When the model provides both inter-event and intra-event standard
/// deviations, one inter-event residual is drawn and shared by every
/// site, then an intra-event residual is drawn per site. Otherwise a
/// single total residual is drawn per site.
pub fn stochastic_ground_motion_field<M, R>(
    model: &mut M,
    rupture: Rupture,
    sites: &[Site],
    rng: &mut R,
) -> Result<GroundMotionField>
where
    M: GroundMotionModel + ?Sized,
    R: Rng + ?Sized,
{
    let mut field = mean_ground_motion_field(model, rupture, sites)?;

    let split = model.supports(StdDevType::InterEvent) && model.supports(StdDevType::IntraEvent);
    debug!(split, "adding independent residuals");
    if split {
        add_inter_event_residual(model, &mut field, rng)?;
        add_site_residuals(model, rupture, sites, StdDevType::IntraEvent, &mut field, rng)?;
    } else if !model.supports(StdDevType::Total) {
        return Err(FieldError::UnsupportedStdDevType(StdDevType::Total));
    } else {
        add_site_residuals(model, rupture, sites, StdDevType::Total, &mut field, rng)?;
    }
    Ok(field)
}

/// Mean field plus spatially correlated residuals.
///
/// The intra-event residual vector is `L * g`, where `L` is the lower
/// Cholesky factor of the Jayaram & Baker (2009) covariance over the
/// sites and `g` a vector of standard truncated Gaussian deviates. The
/// shared inter-event residual is added first when requested.
///
/// Capability checks run before any computation: intra-event support is
/// always required, inter-event support only when
/// `options.include_inter_event` is set.
pub fn correlated_ground_motion_field<M, R>(
    model: &mut M,
    rupture: Rupture,
    sites: &[Site],
    rng: &mut R,
    options: CorrelatedFieldOptions,
) -> Result<GroundMotionField>
where
    M: GroundMotionModel + ?Sized,
    R: Rng + ?Sized,
{
    validate_sites(sites)?;
    if options.include_inter_event && !model.supports(StdDevType::InterEvent) {
        return Err(FieldError::UnsupportedStdDevType(StdDevType::InterEvent));
    }
    if !model.supports(StdDevType::IntraEvent) {
        return Err(FieldError::UnsupportedStdDevType(StdDevType::IntraEvent));
    }
    debug!(
        sites = sites.len(),
        include_inter = options.include_inter_event,
        vs30_cluster = options.vs30_cluster,
        "computing correlated ground-motion field"
    );

    let mut field = mean_ground_motion_field(model, rupture, sites)?;

    if options.include_inter_event {
        add_inter_event_residual(model, &mut field, rng)?;
    }

    let covariance = intra_event_covariance(model, rupture, sites, options.vs30_cluster)?;
    let residuals = correlated_residuals(&covariance, model.truncation(), rng)?;
    for (index, residual) in residuals.into_iter().enumerate() {
        field.add_at(index, residual);
    }
    Ok(field)
}

fn validate_sites(sites: &[Site]) -> Result<()> {
    if sites.is_empty() {
        return Err(FieldError::EmptySiteList);
    }
    let mut seen = HashSet::with_capacity(sites.len());
    for site in sites {
        if !seen.insert(site.id) {
            return Err(FieldError::DuplicateSite(site.id));
        }
    }
    Ok(())
}

/// One residual drawn from the inter-event standard deviation, added to
/// every site. The sigma is read under the current evaluation context;
/// inter-event variability does not depend on the site.
fn add_inter_event_residual<M, R>(
    model: &mut M,
    field: &mut GroundMotionField,
    rng: &mut R,
) -> Result<()>
where
    M: GroundMotionModel + ?Sized,
    R: Rng + ?Sized,
{
    model.select_std_dev_type(StdDevType::InterEvent);
    let residual = truncated_gaussian(model.std_dev(), model.truncation(), rng)?;
    field.add_to_all(residual);
    Ok(())
}

/// One residual per site from the selected standard deviation. Rupture
/// and site are re-set before each sigma read since the spread may vary
/// with the site-rupture geometry.
fn add_site_residuals<M, R>(
    model: &mut M,
    rupture: Rupture,
    sites: &[Site],
    std_dev_type: StdDevType,
    field: &mut GroundMotionField,
    rng: &mut R,
) -> Result<()>
where
    M: GroundMotionModel + ?Sized,
    R: Rng + ?Sized,
{
    model.select_std_dev_type(std_dev_type);
    model.set_rupture(rupture);
    for (index, site) in sites.iter().enumerate() {
        model.set_site(site);
        let residual = truncated_gaussian(model.std_dev(), model.truncation(), rng)?;
        field.add_at(index, residual);
    }
    Ok(())
}
