//! Interface and bond file sets.
//!
//! Output order is fixed: a NIC yields one file; a bond yields the bond
//! device first, then its slaves in the order given.

use crate::ignition::File;
use crate::network::{ifcfg_path, BondSpec, NetworkInterfaceSpec, SlaveSpec};
use crate::render::embed::FileEmbedder;
use crate::render::template::{TemplateError, TemplateKind, TemplateRenderer};

/// `ifcfg-{nic}` for a single interface.
pub async fn interface_files(
    renderer: &TemplateRenderer,
    embedder: &FileEmbedder,
    nic: &NetworkInterfaceSpec,
) -> Result<Vec<File>, TemplateError> {
    let contents = renderer.render(TemplateKind::Nic, nic).await?;
    Ok(vec![embedder.embed(ifcfg_path(&nic.name), &contents)])
}

/// `ifcfg-{bond}` followed by one `ifcfg-{slave}` per slave.
pub async fn bond_files(
    renderer: &TemplateRenderer,
    embedder: &FileEmbedder,
    bond: &BondSpec,
    slaves: &[SlaveSpec],
) -> Result<Vec<File>, TemplateError> {
    let mut files = Vec::with_capacity(1 + slaves.len());

    let contents = renderer.render(TemplateKind::Bond, bond).await?;
    files.push(embedder.embed(ifcfg_path(&bond.name), &contents));

    for slave in slaves {
        let contents = renderer.render(TemplateKind::BondSlave, slave).await?;
        files.push(embedder.embed(ifcfg_path(&slave.name), &contents));
    }

    Ok(files)
}
