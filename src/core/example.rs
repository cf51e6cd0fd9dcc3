use crate::domain::model::{LinearProgram, Relation, Sense};
use crate::utils::error::Result;

/// The bundled example:
///
/// ```text
/// max  x1 + 3 x2
/// s.t. c0:   x1 +   x2 <= 14
///      c1: -2x1 + 3 x2 <= 12
///      c2:  2x1 -   x2 <= 12
///      x1, x2 >= 0
/// ```
///
/// Optimum is x1 = 6, x2 = 8 with objective 30.
pub fn example_program() -> Result<LinearProgram> {
    let mut lp = LinearProgram::new("lp-example", Sense::Maximize);
    let x1 = lp.add_variable("x1", 1.0)?;
    let x2 = lp.add_variable("x2", 3.0)?;

    lp.add_constraint("c0", &[(x1, 1.0), (x2, 1.0)], Relation::LessEqual, 14.0)?;
    lp.add_constraint("c1", &[(x1, -2.0), (x2, 3.0)], Relation::LessEqual, 12.0)?;
    lp.add_constraint("c2", &[(x1, 2.0), (x2, -1.0)], Relation::LessEqual, 12.0)?;

    Ok(lp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_shape() {
        let lp = example_program().unwrap();
        assert_eq!(lp.sense, Sense::Maximize);
        assert_eq!(lp.num_variables(), 2);
        assert_eq!(lp.num_constraints(), 3);

        let names: Vec<&str> = lp.constraints().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["c0", "c1", "c2"]);

        let x1 = lp.variable_by_name("x1").unwrap();
        assert_eq!(lp.constraints()[1].coefficient(x1), -2.0);
    }

    #[test]
    fn test_known_optimum_is_feasible() {
        let lp = example_program().unwrap();
        let point = [6.0, 8.0];
        for c in lp.constraints() {
            let lhs: f64 = c.terms.iter().map(|(v, a)| a * point[v.index()]).sum();
            assert!(lhs <= c.rhs + 1e-12, "{} violated", c.name);
        }
        assert_eq!(lp.objective_at(&point), 30.0);
    }
}
