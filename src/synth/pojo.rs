use super::{DataHolderShape, TablePlan, members};
use crate::emit::{Modifier, TypeDescription, TypeKind};
use crate::options::GenerationOptions;

/// Data-holder type of one table.
pub fn synthesize_data_holder(
    plan: &TablePlan,
    shape: &DataHolderShape,
    options: &GenerationOptions,
) -> TypeDescription {
    let holder = &plan.data_holder;
    let mut description = TypeDescription::new(TypeKind::DataHolder, &holder.package, holder.simple_name());

    description.modifiers = vec![if shape.data { Modifier::Data } else { Modifier::Open }];
    description.annotations = plan.annotations.clone();
    description.super_type = plan.super_type.clone();
    description.implemented_contracts = plan
        .contract
        .iter()
        .chain(&plan.data_holder_implements)
        .cloned()
        .collect();

    description.primary_constructor = Some(members::primary_constructor(plan, shape));
    description.constructors = members::secondary_constructors(plan, shape);
    description.properties = members::data_holder_properties(plan, shape);

    let mut functions = Vec::new();
    if let Some(contract) = plan.contract.as_ref().filter(|_| !options.emit_immutable_contracts) {
        functions.extend(members::bridging_functions(plan, contract, false));
    }
    if shape.is_classic() {
        if options.emit_equals_and_hash {
            functions.push(members::hash_code(plan));
            functions.push(members::equals(plan));
        }
        if options.emit_to_string {
            functions.push(members::to_string(plan));
        }
        if options.emit_copy_helpers {
            functions.extend(members::copy_functions(plan, shape));
        }
        if options.emit_destructuring {
            functions.extend(members::components(plan));
        }
    }
    description.functions = functions;

    description
}
