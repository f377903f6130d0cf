//! Tree-walking interpreter for learner programs
//!
//! The engine handle `t` is the only object in the namespace; every verb
//! call goes through [`Interpreter::dispatch_verb`], which resolves aliases
//! to one canonical verb and converts arguments at the boundary. Builtins
//! cover the handful of functions introductory lessons lean on, with
//! `input` replaced by a non-blocking stand-in.

use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

use turtlekit_core::ScriptError;
use turtlekit_engine::TurtleEngine;

use crate::ast::{BinOp, CmpOp, Expr, Stmt};

/// Ceiling on combined loop-body executions. Purely defensive; the hard
/// wall-clock bound belongs to the sandboxed executor above this layer.
pub const MAX_LOOP_ITERATIONS: u64 = 1_000_000;

/// The name learner scripts use for the turtle handle
pub const TURTLE_HANDLE: &str = "t";

/// A runtime value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(f64),
    Str(String),
    Bool(bool),
    Tuple(Vec<Value>),
    Range { start: i64, stop: i64, step: i64 },
    None,
}

impl Value {
    /// Python-style type name, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "float",
            Value::Str(_) => "str",
            Value::Bool(_) => "bool",
            Value::Tuple(_) => "tuple",
            Value::Range { .. } => "range",
            Value::None => "NoneType",
        }
    }

    fn truthy(&self) -> bool {
        match self {
            Value::Num(n) => *n != 0.0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
            Value::Tuple(items) => !items.is_empty(),
            Value::Range { start, stop, step } => {
                (*step > 0 && start < stop) || (*step < 0 && start > stop)
            }
            Value::None => false,
        }
    }

    fn display(&self) -> String {
        match self {
            Value::Num(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Value::Str(s) => s.clone(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(Value::display).collect();
                format!("({})", parts.join(", "))
            }
            Value::Range { start, stop, step } => format!("range({}, {}, {})", start, stop, step),
            Value::None => "None".to_string(),
        }
    }
}

fn alias_table() -> &'static HashMap<&'static str, &'static str> {
    static ALIASES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    ALIASES.get_or_init(|| {
        HashMap::from([
            ("fd", "forward"),
            ("bk", "backward"),
            ("back", "backward"),
            ("rt", "right"),
            ("lt", "left"),
            ("pu", "penup"),
            ("up", "penup"),
            ("pd", "pendown"),
            ("down", "pendown"),
            ("setpos", "goto"),
            ("setposition", "goto"),
            ("seth", "setheading"),
            ("pos", "position"),
            ("ht", "hideturtle"),
            ("st", "showturtle"),
            ("width", "pensize"),
        ])
    })
}

/// Canonical verbs the engine implements (post-alias)
const VERBS: &[&str] = &[
    "forward",
    "backward",
    "right",
    "left",
    "penup",
    "pendown",
    "pencolor",
    "fillcolor",
    "color",
    "circle",
    "goto",
    "setx",
    "sety",
    "setheading",
    "home",
    "begin_fill",
    "end_fill",
    "dot",
    "position",
    "xcor",
    "ycor",
    "heading",
    "distance",
    "isdown",
    "isvisible",
    "pensize",
    "speed",
    "shape",
    "hideturtle",
    "showturtle",
    "done",
    "title",
    "setup",
];

/// The stand-in for `input()`: never blocks, always answers.
///
/// A prompt that looks like it asks for a number yields "6", anything else
/// yields "5", so scripts built around `int(input(...))` stay deterministic.
fn answer_input(prompt: &str) -> &'static str {
    let lower = prompt.to_lowercase();
    let numeric = lower.contains("how many")
        || lower.contains("number")
        || lower.contains("count")
        || lower.contains("sides")
        || prompt.contains("수");
    if numeric {
        "6"
    } else {
        "5"
    }
}

/// Executes a parsed program against a turtle engine
pub struct Interpreter<'a> {
    engine: &'a mut TurtleEngine,
    vars: HashMap<String, Value>,
    iterations: u64,
}

impl<'a> Interpreter<'a> {
    pub fn new(engine: &'a mut TurtleEngine) -> Self {
        Self {
            engine,
            vars: HashMap::new(),
            iterations: 0,
        }
    }

    pub fn run(&mut self, program: &[Stmt]) -> Result<(), ScriptError> {
        for stmt in program {
            self.exec_stmt(stmt)?;
        }
        debug!(
            primitives = self.engine.primitives().len(),
            frames = self.engine.frames().len(),
            "script completed"
        );
        Ok(())
    }

    fn tick(&mut self) -> Result<(), ScriptError> {
        self.iterations += 1;
        if self.iterations > MAX_LOOP_ITERATIONS {
            return Err(ScriptError::IterationLimit {
                limit: MAX_LOOP_ITERATIONS,
            });
        }
        Ok(())
    }

    fn exec_stmt(&mut self, stmt: &Stmt) -> Result<(), ScriptError> {
        match stmt {
            Stmt::Expr(expr) => {
                self.eval(expr)?;
                Ok(())
            }
            Stmt::Assign { name, value } => {
                let value = self.eval(value)?;
                self.vars.insert(name.clone(), value);
                Ok(())
            }
            Stmt::AugAssign { name, op, value, .. } => {
                let current = self
                    .vars
                    .get(name)
                    .cloned()
                    .ok_or_else(|| ScriptError::UndefinedName { name: name.clone() })?;
                let rhs = self.eval(value)?;
                let updated = apply_binop(*op, current, rhs)?;
                self.vars.insert(name.clone(), updated);
                Ok(())
            }
            Stmt::For { var, iter, body, .. } => {
                let iterable = self.eval(iter)?;
                let (start, stop, step) = match iterable {
                    Value::Range { start, stop, step } => (start, stop, step),
                    other => {
                        return Err(ScriptError::NotIterable {
                            what: other.type_name().to_string(),
                        })
                    }
                };
                let mut i = start;
                while (step > 0 && i < stop) || (step < 0 && i > stop) {
                    self.tick()?;
                    self.vars.insert(var.clone(), Value::Num(i as f64));
                    for stmt in body {
                        self.exec_stmt(stmt)?;
                    }
                    i += step;
                }
                Ok(())
            }
            Stmt::While { cond, body, .. } => {
                while self.eval(cond)?.truthy() {
                    self.tick()?;
                    for stmt in body {
                        self.exec_stmt(stmt)?;
                    }
                }
                Ok(())
            }
            Stmt::If {
                branches,
                else_body,
            } => {
                for (cond, body) in branches {
                    if self.eval(cond)?.truthy() {
                        for stmt in body {
                            self.exec_stmt(stmt)?;
                        }
                        return Ok(());
                    }
                }
                for stmt in else_body {
                    self.exec_stmt(stmt)?;
                }
                Ok(())
            }
            Stmt::Pass => Ok(()),
        }
    }

    fn eval(&mut self, expr: &Expr) -> Result<Value, ScriptError> {
        match expr {
            Expr::Number(n) => Ok(Value::Num(*n)),
            Expr::Str(s) => Ok(Value::Str(s.clone())),
            Expr::Bool(b) => Ok(Value::Bool(*b)),
            Expr::Name { name, .. } => self
                .vars
                .get(name)
                .cloned()
                .ok_or_else(|| ScriptError::UndefinedName { name: name.clone() }),
            Expr::Pair(first, second) => {
                let first = self.eval(first)?;
                let second = self.eval(second)?;
                Ok(Value::Tuple(vec![first, second]))
            }
            Expr::Neg(operand) => {
                let value = self.eval(operand)?;
                match value {
                    Value::Num(n) => Ok(Value::Num(-n)),
                    Value::Bool(b) => Ok(Value::Num(if b { -1.0 } else { 0.0 })),
                    _ => Err(ScriptError::BadOperand {
                        op: "-".to_string(),
                    }),
                }
            }
            Expr::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                apply_binop(*op, left, right)
            }
            Expr::Compare { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                compare(*op, left, right)
            }
            Expr::Call { func, args, .. } => {
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.call_builtin(func, values)
            }
            Expr::MethodCall {
                object,
                method,
                args,
                ..
            } => {
                if object != TURTLE_HANDLE {
                    return Err(ScriptError::UndefinedName {
                        name: object.clone(),
                    });
                }
                let verb = alias_table().get(method.as_str()).copied();
                let verb = verb.unwrap_or(method.as_str());
                if !VERBS.contains(&verb) {
                    return Err(ScriptError::UnknownAttribute {
                        name: method.clone(),
                    });
                }
                let mut values = Vec::with_capacity(args.len());
                for arg in args {
                    values.push(self.eval(arg)?);
                }
                self.dispatch_verb(verb, values)
            }
        }
    }

    fn call_builtin(&mut self, func: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match func {
            "input" => {
                arity(func, &args, 0, 1)?;
                let prompt = args.first().map(Value::display).unwrap_or_default();
                Ok(Value::Str(answer_input(&prompt).to_string()))
            }
            "int" => {
                arity(func, &args, 1, 1)?;
                match &args[0] {
                    Value::Num(n) => Ok(Value::Num(n.trunc())),
                    Value::Bool(b) => Ok(Value::Num(if *b { 1.0 } else { 0.0 })),
                    Value::Str(s) => s
                        .trim()
                        .parse::<i64>()
                        .map(|n| Value::Num(n as f64))
                        .map_err(|_| ScriptError::BadConversion {
                            target: "int".to_string(),
                            value: s.clone(),
                        }),
                    other => Err(ScriptError::BadArgument {
                        verb: "int".to_string(),
                        reason: format!("cannot convert '{}'", other.type_name()),
                    }),
                }
            }
            "float" => {
                arity(func, &args, 1, 1)?;
                match &args[0] {
                    Value::Num(n) => Ok(Value::Num(*n)),
                    Value::Bool(b) => Ok(Value::Num(if *b { 1.0 } else { 0.0 })),
                    Value::Str(s) => s
                        .trim()
                        .parse::<f64>()
                        .map(Value::Num)
                        .map_err(|_| ScriptError::BadConversion {
                            target: "float".to_string(),
                            value: s.clone(),
                        }),
                    other => Err(ScriptError::BadArgument {
                        verb: "float".to_string(),
                        reason: format!("cannot convert '{}'", other.type_name()),
                    }),
                }
            }
            "str" => {
                arity(func, &args, 1, 1)?;
                Ok(Value::Str(args[0].display()))
            }
            "abs" => {
                arity(func, &args, 1, 1)?;
                let n = as_number(func, &args[0])?;
                Ok(Value::Num(n.abs()))
            }
            "range" => {
                arity(func, &args, 1, 3)?;
                let mut bounds = [0i64; 3];
                for (i, value) in args.iter().enumerate() {
                    bounds[i] = as_integer(func, value)?;
                }
                let (start, stop, step) = match args.len() {
                    1 => (0, bounds[0], 1),
                    2 => (bounds[0], bounds[1], 1),
                    _ => (bounds[0], bounds[1], bounds[2]),
                };
                if step == 0 {
                    return Err(ScriptError::BadArgument {
                        verb: "range".to_string(),
                        reason: "arg 3 must not be zero".to_string(),
                    });
                }
                Ok(Value::Range { start, stop, step })
            }
            other => Err(ScriptError::UndefinedName {
                name: other.to_string(),
            }),
        }
    }

    fn dispatch_verb(&mut self, verb: &str, args: Vec<Value>) -> Result<Value, ScriptError> {
        match verb {
            "forward" => {
                arity(verb, &args, 1, 1)?;
                self.engine.forward(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "backward" => {
                arity(verb, &args, 1, 1)?;
                self.engine.backward(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "right" => {
                arity(verb, &args, 1, 1)?;
                self.engine.right(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "left" => {
                arity(verb, &args, 1, 1)?;
                self.engine.left(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "penup" => {
                arity(verb, &args, 0, 0)?;
                self.engine.pen_up();
                Ok(Value::None)
            }
            "pendown" => {
                arity(verb, &args, 0, 0)?;
                self.engine.pen_down();
                Ok(Value::None)
            }
            "pencolor" => {
                arity(verb, &args, 0, 1)?;
                match args.first() {
                    None => Ok(Value::Str(self.engine.pen_color().to_string())),
                    Some(value) => {
                        self.engine.set_pen_color(&as_text(verb, value)?)?;
                        Ok(Value::None)
                    }
                }
            }
            "fillcolor" => {
                arity(verb, &args, 0, 1)?;
                match args.first() {
                    None => Ok(Value::Str(self.engine.fill_color().to_string())),
                    Some(value) => {
                        self.engine.set_fill_color(&as_text(verb, value)?)?;
                        Ok(Value::None)
                    }
                }
            }
            "color" => {
                arity(verb, &args, 0, 2)?;
                match args.len() {
                    0 => Ok(Value::Tuple(vec![
                        Value::Str(self.engine.pen_color().to_string()),
                        Value::Str(self.engine.fill_color().to_string()),
                    ])),
                    1 => {
                        let word = as_text(verb, &args[0])?;
                        self.engine.set_pen_color(&word)?;
                        self.engine.set_fill_color(&word)?;
                        Ok(Value::None)
                    }
                    _ => {
                        self.engine.set_pen_color(&as_text(verb, &args[0])?)?;
                        self.engine.set_fill_color(&as_text(verb, &args[1])?)?;
                        Ok(Value::None)
                    }
                }
            }
            "circle" => {
                arity(verb, &args, 1, 2)?;
                let radius = as_number(verb, &args[0])?;
                let extent = match args.get(1) {
                    Some(value) => as_number(verb, value)?,
                    None => 360.0,
                };
                self.engine.circle(radius, extent);
                Ok(Value::None)
            }
            "goto" => {
                let (x, y) = point_args(verb, &args)?;
                self.engine.goto(x, y);
                Ok(Value::None)
            }
            "setx" => {
                arity(verb, &args, 1, 1)?;
                self.engine.set_x(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "sety" => {
                arity(verb, &args, 1, 1)?;
                self.engine.set_y(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "setheading" => {
                arity(verb, &args, 1, 1)?;
                self.engine.set_heading(as_number(verb, &args[0])?);
                Ok(Value::None)
            }
            "home" => {
                arity(verb, &args, 0, 0)?;
                self.engine.home();
                Ok(Value::None)
            }
            "begin_fill" => {
                arity(verb, &args, 0, 0)?;
                self.engine.begin_fill();
                Ok(Value::None)
            }
            "end_fill" => {
                arity(verb, &args, 0, 0)?;
                self.engine.end_fill();
                Ok(Value::None)
            }
            "dot" => {
                arity(verb, &args, 0, 2)?;
                let size = match args.first() {
                    Some(Value::None) | None => None,
                    Some(value) => Some(as_number(verb, value)?),
                };
                let color = match args.get(1) {
                    Some(Value::None) | None => None,
                    Some(value) => Some(as_text(verb, value)?),
                };
                self.engine.dot(size, color.as_deref())?;
                Ok(Value::None)
            }
            "position" => {
                arity(verb, &args, 0, 0)?;
                let point = self.engine.position();
                Ok(Value::Tuple(vec![Value::Num(point.x), Value::Num(point.y)]))
            }
            "xcor" => {
                arity(verb, &args, 0, 0)?;
                Ok(Value::Num(self.engine.x_cor()))
            }
            "ycor" => {
                arity(verb, &args, 0, 0)?;
                Ok(Value::Num(self.engine.y_cor()))
            }
            "heading" => {
                arity(verb, &args, 0, 0)?;
                Ok(Value::Num(self.engine.heading()))
            }
            "distance" => {
                let (x, y) = point_args(verb, &args)?;
                Ok(Value::Num(self.engine.distance(x, y)))
            }
            "isdown" => {
                arity(verb, &args, 0, 0)?;
                Ok(Value::Bool(self.engine.is_down()))
            }
            "isvisible" => {
                arity(verb, &args, 0, 0)?;
                Ok(Value::Bool(self.engine.is_visible()))
            }
            "pensize" => {
                arity(verb, &args, 0, 1)?;
                match args.first() {
                    None => Ok(Value::Num(f64::from(self.engine.pen_size()))),
                    Some(value) => {
                        self.engine.set_pen_size(as_number(verb, value)?.round() as i32);
                        Ok(Value::None)
                    }
                }
            }
            "speed" => {
                arity(verb, &args, 0, 1)?;
                match args.first() {
                    None => Ok(Value::Num(self.engine.speed() as f64)),
                    Some(value) => {
                        self.engine.set_speed(as_number(verb, value)? as i64);
                        Ok(Value::None)
                    }
                }
            }
            "shape" => {
                arity(verb, &args, 0, 1)?;
                match args.first() {
                    None => Ok(Value::Str(self.engine.shape().to_string())),
                    Some(value) => {
                        self.engine.set_shape(&as_text(verb, value)?);
                        Ok(Value::None)
                    }
                }
            }
            "hideturtle" => {
                arity(verb, &args, 0, 0)?;
                self.engine.hide_turtle();
                Ok(Value::None)
            }
            "showturtle" => {
                arity(verb, &args, 0, 0)?;
                self.engine.show_turtle();
                Ok(Value::None)
            }
            // Compatibility no-ops: arguments are evaluated, then ignored.
            "done" | "title" | "setup" => Ok(Value::None),
            _ => Err(ScriptError::UnknownAttribute {
                name: verb.to_string(),
            }),
        }
    }
}

fn arity(verb: &str, args: &[Value], min: usize, max: usize) -> Result<(), ScriptError> {
    if args.len() < min || args.len() > max {
        let expected = if min == max {
            format!("{}", min)
        } else {
            format!("{} to {}", min, max)
        };
        return Err(ScriptError::BadArgument {
            verb: verb.to_string(),
            reason: format!("takes {} arguments, got {}", expected, args.len()),
        });
    }
    Ok(())
}

fn as_number(verb: &str, value: &Value) -> Result<f64, ScriptError> {
    match value {
        Value::Num(n) => Ok(*n),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(ScriptError::BadArgument {
            verb: verb.to_string(),
            reason: format!("expected a number, got '{}'", other.type_name()),
        }),
    }
}

fn as_integer(verb: &str, value: &Value) -> Result<i64, ScriptError> {
    let n = as_number(verb, value)?;
    if n.fract() != 0.0 {
        return Err(ScriptError::BadArgument {
            verb: verb.to_string(),
            reason: "'float' object cannot be interpreted as an integer".to_string(),
        });
    }
    Ok(n as i64)
}

fn as_text(verb: &str, value: &Value) -> Result<String, ScriptError> {
    match value {
        Value::Str(s) => Ok(s.clone()),
        other => Err(ScriptError::BadArgument {
            verb: verb.to_string(),
            reason: format!("expected a string, got '{}'", other.type_name()),
        }),
    }
}

/// Accept `(x, y)` as two numbers or one pair value
fn point_args(verb: &str, args: &[Value]) -> Result<(f64, f64), ScriptError> {
    match args {
        [Value::Tuple(items)] if items.len() == 2 => {
            Ok((as_number(verb, &items[0])?, as_number(verb, &items[1])?))
        }
        [x, y] => Ok((as_number(verb, x)?, as_number(verb, y)?)),
        _ => Err(ScriptError::BadArgument {
            verb: verb.to_string(),
            reason: "expected coordinates (x, y)".to_string(),
        }),
    }
}

fn apply_binop(op: BinOp, left: Value, right: Value) -> Result<Value, ScriptError> {
    // String concatenation and repetition first; everything else is numeric.
    match (&op, &left, &right) {
        (BinOp::Add, Value::Str(a), Value::Str(b)) => {
            return Ok(Value::Str(format!("{}{}", a, b)));
        }
        (BinOp::Mul, Value::Str(s), Value::Num(n)) | (BinOp::Mul, Value::Num(n), Value::Str(s)) => {
            let times = if *n <= 0.0 { 0 } else { n.trunc() as usize };
            return Ok(Value::Str(s.repeat(times)));
        }
        _ => {}
    }

    let a = as_number(op.symbol(), &left).map_err(|_| ScriptError::BadOperand {
        op: op.symbol().to_string(),
    })?;
    let b = as_number(op.symbol(), &right).map_err(|_| ScriptError::BadOperand {
        op: op.symbol().to_string(),
    })?;

    let result = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b == 0.0 {
                return Err(ScriptError::DivisionByZero);
            }
            a / b
        }
        BinOp::FloorDiv => {
            if b == 0.0 {
                return Err(ScriptError::DivisionByZero);
            }
            (a / b).floor()
        }
        BinOp::Mod => {
            if b == 0.0 {
                return Err(ScriptError::DivisionByZero);
            }
            a - b * (a / b).floor()
        }
    };
    Ok(Value::Num(result))
}

fn compare(op: CmpOp, left: Value, right: Value) -> Result<Value, ScriptError> {
    let result = match (&left, &right) {
        (Value::Str(a), Value::Str(b)) => match op {
            CmpOp::Eq => a == b,
            CmpOp::Ne => a != b,
            CmpOp::Lt => a < b,
            CmpOp::Le => a <= b,
            CmpOp::Gt => a > b,
            CmpOp::Ge => a >= b,
        },
        _ => {
            let a = as_number(op.symbol(), &left);
            let b = as_number(op.symbol(), &right);
            match (a, b) {
                (Ok(a), Ok(b)) => match op {
                    CmpOp::Eq => a == b,
                    CmpOp::Ne => a != b,
                    CmpOp::Lt => a < b,
                    CmpOp::Le => a <= b,
                    CmpOp::Gt => a > b,
                    CmpOp::Ge => a >= b,
                },
                // Mismatched types: equality is decidable, ordering is not.
                _ => match op {
                    CmpOp::Eq => false,
                    CmpOp::Ne => true,
                    _ => {
                        return Err(ScriptError::BadOperand {
                            op: op.symbol().to_string(),
                        })
                    }
                },
            }
        }
    };
    Ok(Value::Bool(result))
}
