use super::{TablePlan, members};
use crate::emit::{TypeDescription, TypeKind};
use crate::options::GenerationOptions;

/// Contract (interface) type of one table, or `None` when contracts are not
/// generated.
pub fn synthesize_contract(plan: &TablePlan, options: &GenerationOptions) -> Option<TypeDescription> {
    let contract = plan.contract.as_ref()?;
    let mutable = !options.emit_immutable_contracts;

    let mut description = TypeDescription::new(TypeKind::Contract, &contract.package, contract.simple_name());
    description.annotations = plan.annotations.clone();
    description.implemented_contracts = plan.contract_implements.clone();
    description.properties = members::contract_properties(plan, mutable);
    if mutable {
        description.functions = members::bridging_functions(plan, contract, true);
    }
    Some(description)
}
