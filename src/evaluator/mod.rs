//! Tree-walking evaluator (spec §4.3). `eval` dispatches on node variant;
//! it is not re-entrant for concurrency (the whole core is single-threaded)
//! but is re-entrant for recursion — function application calls back into
//! `eval` on the callee's body.

pub mod builtins;

use std::rc::Rc;

use crate::ast::{BlockStatement, Expression, Program, Statement};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::object::{native_bool, Object, NULL};

pub use builtins::OnExit;

/// The evaluator's only configuration knob (spec §9, Design Notes).
#[derive(Debug, Clone, Copy, Default)]
pub struct EvaluatorConfig {
    pub on_exit: OnExit,
}

pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::with_config(EvaluatorConfig::default())
    }

    pub fn with_config(config: EvaluatorConfig) -> Self {
        builtins::set_on_exit(config.on_exit);
        Evaluator { config }
    }

    pub fn config(&self) -> EvaluatorConfig {
        self.config
    }

    pub fn eval_program(&self, program: &Program, env: &Environment) -> Object {
        let mut result = NULL.clone();
        for stmt in &program.statements {
            result = self.eval_statement(stmt, env);
            match &result {
                Object::ReturnValue(inner) => return (**inner).clone(),
                Object::Error(_) => return result,
                _ => {}
            }
        }
        result
    }

    fn eval_block_statement(&self, block: &BlockStatement, env: &Environment) -> Object {
        let mut result = NULL.clone();
        for stmt in &block.statements {
            result = self.eval_statement(stmt, env);
            if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
                return result;
            }
        }
        result
    }

    fn eval_statement(&self, stmt: &Statement, env: &Environment) -> Object {
        match stmt {
            Statement::Let(let_stmt) => {
                let value = self.eval_expression(&let_stmt.value, env);
                if value.is_error() {
                    return value;
                }
                env.set(let_stmt.name.value.clone(), value);
                NULL.clone()
            }
            Statement::Return(ret_stmt) => {
                let value = self.eval_expression(&ret_stmt.return_value, env);
                if value.is_error() {
                    return value;
                }
                Object::ReturnValue(Box::new(value))
            }
            Statement::Expression(expr_stmt) => self.eval_expression(&expr_stmt.expression, env),
            Statement::Block(block) => self.eval_block_statement(block, env),
        }
    }

    fn eval_expression(&self, expr: &Expression, env: &Environment) -> Object {
        match expr {
            Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
            Expression::StringLiteral { value, .. } => Object::String(value.clone()),
            Expression::BooleanLiteral { value, .. } => native_bool(*value),
            Expression::Identifier(ident) => self.eval_identifier(&ident.value, env),
            Expression::Prefix {
                operator, right, ..
            } => {
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_prefix_expression(operator, right)
            }
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let right = self.eval_expression(right, env);
                if right.is_error() {
                    return right;
                }
                self.eval_infix_expression(operator, left, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => self.eval_if_expression(condition, consequence, alternative.as_ref(), env),
            Expression::FunctionLiteral {
                parameters, body, ..
            } => Object::Function {
                parameters: parameters.clone(),
                body: Rc::new(body.clone()),
                env: env.clone(),
            },
            Expression::Call {
                function,
                arguments,
                ..
            } => {
                let function = self.eval_expression(function, env);
                if function.is_error() {
                    return function;
                }
                let args = match self.eval_expressions(arguments, env) {
                    Ok(args) => args,
                    Err(err) => return err,
                };
                self.apply_function(function, args)
            }
            Expression::ArrayLiteral { elements, .. } => {
                match self.eval_expressions(elements, env) {
                    Ok(elems) => Object::Array(elems),
                    Err(err) => err,
                }
            }
            Expression::Index { left, index, .. } => {
                let left = self.eval_expression(left, env);
                if left.is_error() {
                    return left;
                }
                let index = self.eval_expression(index, env);
                if index.is_error() {
                    return index;
                }
                self.eval_index_expression(left, index)
            }
        }
    }

    fn eval_identifier(&self, name: &str, env: &Environment) -> Object {
        if let Some(value) = env.get(name) {
            return value;
        }
        if let Some(builtin) = builtins::lookup(name) {
            return builtin;
        }
        Object::Error(
            EvalError::IdentifierNotFound {
                name: name.to_string(),
            }
            .to_string(),
        )
    }

    /// Evaluates arguments/elements left-to-right; short-circuits on the
    /// first error, returning a one-element error list per spec §4.3.2.
    fn eval_expressions(
        &self,
        exprs: &[Expression],
        env: &Environment,
    ) -> Result<Vec<Object>, Object> {
        let mut result = Vec::with_capacity(exprs.len());
        for expr in exprs {
            let value = self.eval_expression(expr, env);
            if value.is_error() {
                return Err(value);
            }
            result.push(value);
        }
        Ok(result)
    }

    fn eval_prefix_expression(&self, operator: &str, right: Object) -> Object {
        match operator {
            "!" => native_bool(!right.is_truthy()),
            "-" => match right {
                Object::Integer(v) => Object::Integer(v.wrapping_neg()),
                other => Object::Error(
                    EvalError::unknown_operator_prefix(operator, other.type_name()).to_string(),
                ),
            },
            _ => Object::Error(
                EvalError::unknown_operator_prefix(operator, right.type_name()).to_string(),
            ),
        }
    }

    fn eval_infix_expression(&self, operator: &str, left: Object, right: Object) -> Object {
        match (&left, &right) {
            (Object::Integer(l), Object::Integer(r)) => {
                self.eval_integer_infix_expression(operator, *l, *r)
            }
            _ if operator == "==" => native_bool(left.ref_eq(&right)),
            _ if operator == "!=" => native_bool(!left.ref_eq(&right)),
            _ if left.type_name() != right.type_name() => Object::Error(
                EvalError::TypeMismatch {
                    left: left.type_name(),
                    operator: operator.to_string(),
                    right: right.type_name(),
                }
                .to_string(),
            ),
            _ => Object::Error(
                EvalError::UnknownOperatorInfix {
                    left: left.type_name(),
                    operator: operator.to_string(),
                    right: right.type_name(),
                }
                .to_string(),
            ),
        }
    }

    fn eval_integer_infix_expression(&self, operator: &str, left: i64, right: i64) -> Object {
        match operator {
            "+" => Object::Integer(left.wrapping_add(right)),
            "-" => Object::Integer(left.wrapping_sub(right)),
            "*" => Object::Integer(left.wrapping_mul(right)),
            "/" => {
                if right == 0 {
                    Object::Error(EvalError::DivideByZero.to_string())
                } else {
                    Object::Integer(left.wrapping_div(right))
                }
            }
            "<" => native_bool(left < right),
            ">" => native_bool(left > right),
            "==" => native_bool(left == right),
            "!=" => native_bool(left != right),
            _ => Object::Error(
                EvalError::UnknownOperatorInfix {
                    left: "INTEGER",
                    operator: operator.to_string(),
                    right: "INTEGER",
                }
                .to_string(),
            ),
        }
    }

    fn eval_if_expression(
        &self,
        condition: &Expression,
        consequence: &BlockStatement,
        alternative: Option<&BlockStatement>,
        env: &Environment,
    ) -> Object {
        let condition = self.eval_expression(condition, env);
        if condition.is_error() {
            return condition;
        }
        if condition.is_truthy() {
            self.eval_block_statement(consequence, env)
        } else if let Some(alt) = alternative {
            self.eval_block_statement(alt, env)
        } else {
            NULL.clone()
        }
    }

    fn apply_function(&self, function: Object, args: Vec<Object>) -> Object {
        match function {
            Object::Function {
                parameters,
                body,
                env,
            } => {
                let call_env = Environment::new_enclosed(env);
                // No arity check: extra arguments are dropped, missing ones
                // leave the parameter unbound (spec §9, Open Question —
                // resolved by faithfully reproducing this behavior).
                for (param, arg) in parameters.iter().zip(args.into_iter()) {
                    call_env.set(param.value.clone(), arg);
                }
                let evaluated = self.eval_block_statement(&body, &call_env);
                match evaluated {
                    Object::ReturnValue(inner) => *inner,
                    other => other,
                }
            }
            Object::Builtin(f) => f(&args),
            other => Object::Error(
                EvalError::NotAFunction {
                    type_name: other.type_name(),
                }
                .to_string(),
            ),
        }
    }

    fn eval_index_expression(&self, left: Object, index: Object) -> Object {
        match (&left, &index) {
            (Object::Array(elems), Object::Integer(i)) => {
                if *i < 0 || *i as usize >= elems.len() {
                    NULL.clone()
                } else {
                    elems[*i as usize].clone()
                }
            }
            _ => Object::Error(
                EvalError::UnknownOperatorInfix {
                    left: left.type_name(),
                    operator: "[]".to_string(),
                    right: index.type_name(),
                }
                .to_string(),
            ),
        }
    }
}

/// Convenience entry point: parse already done by the caller, evaluate a
/// program against a fresh global environment. Mirrors the shape of the
/// public API in spec §6 for callers that don't need a custom config.
pub fn eval(program: &Program, env: &Environment) -> Object {
    Evaluator::new().eval_program(program, env)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser::Parser;

    fn eval_str(input: &str) -> Object {
        let lexer = Lexer::new(input);
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        assert!(parser.errors().is_empty(), "parse errors: {:?}", parser.errors());
        let env = Environment::new();
        Evaluator::new().eval_program(&program, &env)
    }

    #[test]
    fn integer_arithmetic() {
        assert_eq!(eval_str("5 + 5 * 2"), Object::Integer(15));
        assert_eq!(eval_str("(5 + 10 * 2 + 15 / 3) * 2 + -10"), Object::Integer(50));
    }

    #[test]
    fn let_statements_and_bindings() {
        assert_eq!(
            eval_str("let a = 5; let b = a; let c = a + b + 5; c;"),
            Object::Integer(15)
        );
    }

    #[test]
    fn function_application() {
        assert_eq!(
            eval_str("let add = fn(x, y) { x + y; }; add(5 + 5, add(5, 5));"),
            Object::Integer(20)
        );
    }

    #[test]
    fn closures_capture_outer_environment() {
        assert_eq!(
            eval_str(
                "let newAdder = fn(x) { fn(y) { x + y }; }; let addTwo = newAdder(2); addTwo(10);"
            ),
            Object::Integer(12)
        );
    }

    #[test]
    fn nested_return_propagates_error_through_blocks() {
        let result = eval_str(
            "if (10 > 1) { if (10 > 1) { return true + false; } return 1; }",
        );
        assert_eq!(
            result,
            Object::Error("unknown operator: BOOLEAN + BOOLEAN".to_string())
        );
    }

    #[test]
    fn builtin_len_push() {
        assert_eq!(eval_str("len(push([1,2], 3))"), Object::Integer(3));
    }

    #[test]
    fn identifier_not_found() {
        assert_eq!(
            eval_str("foobar;"),
            Object::Error("identifier not found: foobar".to_string())
        );
    }

    #[test]
    fn truthiness_of_bang_operator() {
        assert_eq!(eval_str("!true"), Object::Boolean(false));
        assert_eq!(eval_str("!5"), Object::Boolean(false));
        assert_eq!(eval_str("!!5"), Object::Boolean(true));
        assert_eq!(eval_str("!0"), Object::Boolean(false));
    }

    #[test]
    fn if_without_else_and_falsy_condition_yields_null() {
        assert_eq!(eval_str("if (false) { 10 }"), Object::Null);
    }

    #[test]
    fn string_equality_is_identity_not_value() {
        // Two freshly constructed strings with equal content are not `==`
        // in this core (see DESIGN.md — faithful to the original).
        let result = eval_str(r#""hello" == "hello""#);
        assert_eq!(result, Object::Boolean(false));
    }

    #[test]
    fn boolean_and_null_equality_use_shared_singletons() {
        assert_eq!(eval_str("true == true"), Object::Boolean(true));
        assert_eq!(eval_str("true == false"), Object::Boolean(false));
    }

    #[test]
    fn type_mismatch_error() {
        assert_eq!(
            eval_str("5 + true;"),
            Object::Error("type mismatch: INTEGER + BOOLEAN".to_string())
        );
    }

    #[test]
    fn prefix_unknown_operator_error_includes_operand_type() {
        assert_eq!(
            eval_str("-true"),
            Object::Error("unknown operator: -BOOLEAN".to_string())
        );
    }

    #[test]
    fn calling_non_function_is_an_error() {
        assert_eq!(
            eval_str("let notAFunction = 10; notAFunction(1);"),
            Object::Error("not a function: INTEGER".to_string())
        );
    }

    #[test]
    fn missing_arguments_leave_param_unbound_and_surface_as_identifier_error() {
        // Faithful reproduction of the spec's documented no-arity-check
        // behavior: calling with too few args means the missing parameter
        // is simply never bound.
        let result = eval_str("let add = fn(x, y) { x + y; }; add(1);");
        assert_eq!(
            result,
            Object::Error("identifier not found: y".to_string())
        );
    }

    #[test]
    fn extra_arguments_are_ignored() {
        assert_eq!(
            eval_str("let one = fn(x) { x; }; one(5, 6, 7);"),
            Object::Integer(5)
        );
    }

    #[test]
    fn array_index_out_of_range_is_null() {
        assert_eq!(eval_str("[1, 2, 3][10]"), Object::Null);
        assert_eq!(eval_str("[1, 2, 3][-1]"), Object::Null);
    }

    #[test]
    fn divide_by_zero_is_an_evaluator_error() {
        assert_eq!(eval_str("5 / 0"), Object::Error("divide by zero".to_string()));
    }

    #[test]
    fn referential_transparency_of_pure_expressions() {
        let env = Environment::new();
        let lexer = Lexer::new("1 + 2 * 3");
        let mut parser = Parser::new(lexer);
        let program = parser.parse_program();
        let evaluator = Evaluator::new();
        let first = evaluator.eval_program(&program, &env);
        let second = evaluator.eval_program(&program, &env);
        assert_eq!(first, second);
    }
}
