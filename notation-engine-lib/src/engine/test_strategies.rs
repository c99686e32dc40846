use proptest::prelude::*;

/// Prefix expressions over the given operators, at most three operators deep.
pub(crate) fn prefix_expression(
    operators: &'static [&'static str],
) -> impl Strategy<Value = Vec<String>> {
    let leaf = (-9i32..10).prop_map(|value| vec![value.to_string()]);
    leaf.prop_recursive(3, 16, 2, move |inner| {
        (prop::sample::select(operators), inner.clone(), inner).prop_map(
            |(operator, left_operand, right_operand)| {
                let mut tokens = vec![operator.to_string()];
                tokens.extend(left_operand);
                tokens.extend(right_operand);
                tokens
            },
        )
    })
}
