use std::collections::HashMap;

use kode::{
    interpreter::{
        executor::core::run,
        frame::{Frame, FrameRef},
    },
    run_source,
};

fn assert_success(src: &str) {
    if let Err(e) = run_source(src) {
        panic!("Script failed: {e}");
    }
}

fn assert_failure(src: &str) {
    if run_source(src).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

/// Runs a program and returns its root frame for inspection.
fn run_program(src: &str) -> FrameRef {
    let scope = Frame::root(src);
    if let Err(e) = run(&scope, Vec::new(), HashMap::new(), 0, 0) {
        panic!("Script failed: {e}");
    }
    scope
}

/// The stringification of a root variable, as `print` would show it.
fn global(scope: &FrameRef, name: &str) -> String {
    let cell = scope.borrow()
                    .lookup(name)
                    .unwrap_or_else(|| panic!("missing variable {name}"));
    let value = cell.borrow().to_string();
    value
}

#[test]
fn declaration_and_operator_precedence() {
    let scope = run_program("val x = 1 + 2 * 3");
    assert_eq!(global(&scope, "x"), "7");

    let scope = run_program("val y = (1 + 2) * 3");
    assert_eq!(global(&scope, "y"), "9");

    let scope = run_program("val z = 2 ^ 3 * 2");
    assert_eq!(global(&scope, "z"), "16");
}

#[test]
fn loop_summation() {
    let scope = run_program("int n = 10\nval sum = 0\nfor n > 0\n  sum := sum + n\n  n = n - \
                             1\nend for");
    assert_eq!(global(&scope, "sum"), "55");
    assert_eq!(global(&scope, "n"), "0");
}

#[test]
fn recursive_factorial() {
    let scope = run_program("func fact(int n) int\n  if n <= 1\n    return 1\n  end if\n  \
                             return n * fact(n - 1)\nend fact\nval r = fact(5)");
    assert_eq!(global(&scope, "r"), "120");
}

#[test]
fn negative_index_wraps_on_write() {
    let scope = run_program("val xs = [1, 2, 3]\nxs[-1] = 9");
    assert_eq!(global(&scope, "xs"), "[1, 2, 9]");
}

#[test]
fn index_wraps_on_read() {
    let scope = run_program("val xs = [10, 20, 30]\nval a = xs[5]\nval b = xs[-1]\nval c = \
                             xs[0]");
    assert_eq!(global(&scope, "a"), "30");
    assert_eq!(global(&scope, "b"), "30");
    assert_eq!(global(&scope, "c"), "10");
}

#[test]
fn indexing_an_empty_array_is_an_error() {
    assert_failure("int[] xs = []\nval a = xs[0]");
}

#[test]
fn string_concat_and_len() {
    let scope = run_program("val s = \"he\" + \"llo\"\nval n = len(s)");
    assert_eq!(global(&scope, "s"), "hello");
    assert_eq!(global(&scope, "n"), "5");
}

#[test]
fn string_indexing_is_byte_oriented_and_wraps() {
    let scope = run_program("val s = \"hello\"\nval a = s[1]\nval b = s[-1]");
    assert_eq!(global(&scope, "a"), "e");
    assert_eq!(global(&scope, "b"), "o");
}

#[test]
fn division_error_reports_both_frames() {
    let error = run_source("func div(int a, int b) int\nreturn a / b\nend div\ndiv(1, 0)")
        .expect_err("division by zero must fail");
    assert_eq!(error.to_string(),
               "Division by zero on line 2.\n  └In function \"div\" on line 1.");
}

#[test]
fn type_rigidity() {
    assert_failure("int x = 1.5");
    assert_failure("val x = 1\nx = 1.5");
    assert_failure("string s = 3");

    let scope = run_program("val x = 1\nx := 1.5\nval t = typeOf(x)");
    assert_eq!(global(&scope, "t"), "float");
}

#[test]
fn declarations_do_not_shadow() {
    assert_failure("val x = 1\nval x = 2");
    assert_failure("val x = 1\nif true\n  val x = 2\nend if");
    assert_failure("val print = 1");
    assert_failure("val for = 1");
}

#[test]
fn arrays_pass_by_reference() {
    let scope = run_program("func poke(int[] xs)\n  xs[0] = 99\nend poke\nval a = [1, 2, \
                             3]\npoke(a)");
    assert_eq!(global(&scope, "a"), "[99, 2, 3]");
}

#[test]
fn primitives_pass_by_copy() {
    let scope = run_program("func bump(int n)\n  n = n + 1\nend bump\nval k = 1\nbump(k)");
    assert_eq!(global(&scope, "k"), "1");
}

#[test]
fn blocks_alias_the_enclosing_cells() {
    let scope = run_program("val x = 1\nif true\n  x = 2\nend if");
    assert_eq!(global(&scope, "x"), "2");
}

#[test]
fn closures_capture_cells_across_calls() {
    let scope = run_program("int total = 0\nfunc add(int n)\n  total = total + n\nend \
                             add\nadd(3)\nadd(4)");
    assert_eq!(global(&scope, "total"), "7");
}

#[test]
fn instances_keep_state_between_method_calls() {
    let scope = run_program("func Counter(int start)\n  int count = start\n  func \
                             increment()\n    count = count + 1\n  end increment\nend \
                             Counter\nval c = new Counter(5)\nc.increment()\nc.increment()\nval \
                             v = c.count");
    assert_eq!(global(&scope, "v"), "7");
}

#[test]
fn instance_members_are_readable() {
    let scope = run_program("func Thing()\n  int id = 7\nend Thing\nval t = new Thing()\nval s \
                             = t.id");
    assert_eq!(global(&scope, "s"), "7");
}

#[test]
fn self_and_super_are_frames() {
    let scope = run_program("val a = typeOf(self)\nval b = typeOf(super)");
    assert_eq!(global(&scope, "a"), "func");
    assert_eq!(global(&scope, "b"), "func");
}

#[test]
fn instantiating_a_non_function_is_an_error() {
    assert_failure("val x = 1\nval y = new x()");
}

#[test]
fn break_terminates_the_innermost_loop() {
    let scope = run_program("int n = 0\nfor true\n  n = n + 1\n  if n == 3\n    break\n  end \
                             if\nend for");
    assert_eq!(global(&scope, "n"), "3");
}

#[test]
fn return_unwinds_through_blocks() {
    let scope = run_program("func pick(int n) string\n  if n > 0\n    return \"plus\"\n  end \
                             if\n  return \"minus\"\nend pick\nval r = pick(2)\nval m = \
                             pick(-1)");
    assert_eq!(global(&scope, "r"), "plus");
    assert_eq!(global(&scope, "m"), "minus");
}

#[test]
fn return_type_is_enforced_inside_blocks() {
    assert_failure("func bad() int\n  return \"nope\"\nend bad\nbad()");
    assert_failure("func worse() int\n  if true\n    return \"nope\"\n  end if\nend \
                    worse\nworse()");
}

#[test]
fn else_if_cascade_picks_the_first_truthy_arm() {
    let scope = run_program("int n = 5\nval label = \"\"\nif n < 0\n  label = \"neg\"\nelse if \
                             n == 0\n  label = \"zero\"\nelse\n  label = \"pos\"\nend if");
    assert_eq!(global(&scope, "label"), "pos");
}

#[test]
fn nested_cascades_do_not_bind_to_outer_else() {
    let scope = run_program("val label = \"\"\nif true\n  if false\n    label = \"inner\"\n  \
                             end if\nelse\n  label = \"outer\"\nend if");
    assert_eq!(global(&scope, "label"), "");
}

#[test]
fn conditions_must_be_boolean() {
    assert_failure("if 1\nend if");
    assert_failure("for 1\nend for");
}

#[test]
fn unterminated_blocks_are_errors() {
    assert_failure("if true");
    assert_failure("for true");
    assert_failure("func f()");
}

#[test]
fn comments_are_ignored() {
    let scope = run_program("# full line comment\nval x = 1 # trailing comment\n# another");
    assert_eq!(global(&scope, "x"), "1");
}

#[test]
fn string_escapes_decode() {
    let scope = run_program("val s = \"say \\\"hi\\\"\"\nval n = len(s)");
    assert_eq!(global(&scope, "s"), "say \"hi\"");
    assert_eq!(global(&scope, "n"), "8");
}

#[test]
fn empty_array_literal_adopts_the_declared_tag() {
    let scope = run_program("int[] xs = []\nval t = typeOf(xs)\nval ys = append(xs, 5)\nval u \
                             = typeOf(ys)");
    assert_eq!(global(&scope, "t"), "int[]");
    assert_eq!(global(&scope, "ys"), "[5]");
    assert_eq!(global(&scope, "u"), "int[]");
}

#[test]
fn typed_array_declarations_reject_other_tags() {
    assert_failure("int[] xs = [1.5]");
    assert_failure("val[] xs = [1, 2]");
    assert_success("val[] xs = []");
    assert_success("val[] xs = [1, \"a\"]");
}

#[test]
fn heterogeneous_arrays_check_element_tags_on_write() {
    let scope = run_program("val mixed = [1, \"a\", true]\nval t = typeOf(mixed)\nmixed[0] = \
                             2\nmixed[0] := \"b\"");
    assert_eq!(global(&scope, "t"), "val[]");
    assert_eq!(global(&scope, "mixed"), "[b, a, true]");
    assert_failure("val mixed = [1, \"a\"]\nmixed[0] = \"b\"");
}

#[test]
fn multidimensional_arrays_index_and_assign() {
    let scope = run_program("val grid = [[1, 2], [3, 4]]\nval t = typeOf(grid)\nval x = \
                             grid[1][0]\ngrid[0][1] = 9");
    assert_eq!(global(&scope, "t"), "int[][]");
    assert_eq!(global(&scope, "x"), "3");
    assert_eq!(global(&scope, "grid"), "[[1, 9], [3, 4]]");
}

#[test]
fn logical_operators_and_aliases() {
    let scope = run_program("val a = true and false\nval o = true or false\nval n = not \
                             true\nval e = 3 is 3\nval neg = ¬ 5");
    assert_eq!(global(&scope, "a"), "false");
    assert_eq!(global(&scope, "o"), "true");
    assert_eq!(global(&scope, "n"), "false");
    assert_eq!(global(&scope, "e"), "true");
    assert_eq!(global(&scope, "neg"), "-5");
}

#[test]
fn strings_order_by_length() {
    let scope = run_program("val b = \"abc\" > \"zz\"\nval c = \"ab\" <= \"cd\"");
    assert_eq!(global(&scope, "b"), "true");
    assert_eq!(global(&scope, "c"), "true");
}

#[test]
fn null_comparisons() {
    let scope = run_program("val e = null == null\nval f = null != null");
    assert_eq!(global(&scope, "e"), "true");
    assert_eq!(global(&scope, "f"), "false");
}

#[test]
fn numeric_promotion_and_division() {
    let scope = run_program("val d = 7 / 2\nval f = 7.0 / 2\nval eq = 2 == 2.0");
    assert_eq!(global(&scope, "d"), "3");
    assert_eq!(global(&scope, "f"), "3.5");
    assert_eq!(global(&scope, "eq"), "true");

    assert_failure("val x = 1 / 0");
    assert_failure("val x = 1.0 / 0.0");
    assert_failure("val x = 1 % 0");
}

#[test]
fn modulo_conventions() {
    let scope = run_program("val m = 7 % 3\nval neg = 0 - 7\nval m2 = neg % 3\nval f = 7.5 % \
                             2.0\nval f2 = (0 - 7.5) % 2.0");
    assert_eq!(global(&scope, "m"), "1");
    assert_eq!(global(&scope, "m2"), "-1");
    assert_eq!(global(&scope, "f"), "1.5");
    assert_eq!(global(&scope, "f2"), "0.5");
}

#[test]
fn string_repetition_and_array_prepend() {
    let scope = run_program("val r = \"ab\" * 3\nval xs = \"a\" + [\"b\", \"c\"]\nval t = \
                             typeOf(xs)");
    assert_eq!(global(&scope, "r"), "ababab");
    assert_eq!(global(&scope, "xs"), "[a, b, c]");
    assert_eq!(global(&scope, "t"), "string[]");

    // The mirrored order is not defined.
    assert_failure("val xs = [\"b\"] + \"a\"");
}

#[test]
fn array_concatenation_requires_matching_element_tags() {
    let scope = run_program("val xs = [1, 2] + [3]\nval t = typeOf(xs)");
    assert_eq!(global(&scope, "xs"), "[1, 2, 3]");
    assert_eq!(global(&scope, "t"), "int[]");

    assert_failure("val xs = [1] + [\"a\"]");
}

#[test]
fn conversion_builtins() {
    let scope = run_program("val k = toInt(toString(42))\nval t = toInt(3.9)\nval f = \
                             toFloat(\"2.5\")\nval s = toString(1.5)\nval bit = \
                             toFloat(toString(0.1)) == 0.1");
    assert_eq!(global(&scope, "k"), "42");
    assert_eq!(global(&scope, "t"), "3");
    assert_eq!(global(&scope, "f"), "2.5");
    assert_eq!(global(&scope, "s"), "1.5");
    assert_eq!(global(&scope, "bit"), "true");

    assert_failure("val x = toInt(\"abc\")");
    assert_failure("val x = toFloat(\"abc\")");
}

#[test]
fn string_builtins() {
    let scope = run_program("val up = yell(\"kode\")\nval down = whisper(\"LOUD\")\nval a = \
                             isNumeric(\"3.5\")\nval b = isNumeric(\"x\")\nval c = \
                             isAlphaNumeric(\"abc123\")\nval d = isAlphaNumeric(\"a b\")");
    assert_eq!(global(&scope, "up"), "KODE");
    assert_eq!(global(&scope, "down"), "loud");
    assert_eq!(global(&scope, "a"), "true");
    assert_eq!(global(&scope, "b"), "false");
    assert_eq!(global(&scope, "c"), "true");
    assert_eq!(global(&scope, "d"), "false");
}

#[test]
fn unicode_builtins() {
    let scope = run_program("val code = toUnicode(\"A\")\nval back = fromUnicode(66)");
    assert_eq!(global(&scope, "code"), "65");
    assert_eq!(global(&scope, "back"), "B");

    assert_failure("val x = toUnicode(\"ab\")");
    assert_failure("val x = fromUnicode(0 - 1)");
}

#[test]
fn numeric_builtins() {
    let scope = run_program("val r = round(3.7)\nval s = sqrt(9)\nval q = sqrt(2.25)");
    assert_eq!(global(&scope, "r"), "4");
    assert_eq!(global(&scope, "s"), "3");
    assert_eq!(global(&scope, "q"), "1.5");

    assert_failure("val x = sqrt(0 - 1)");
    assert_failure("val x = round(3)");
}

#[test]
fn random_stays_in_range() {
    let scope = run_program("val r = random()\nval low = r >= 0.0\nval high = r < 1.0");
    assert_eq!(global(&scope, "low"), "true");
    assert_eq!(global(&scope, "high"), "true");
}

#[test]
fn truncate_removes_the_wrapped_index() {
    let scope = run_program("val a = truncate([1, 2, 3], 0)\nval b = truncate([1, 2, 3], \
                             -1)\nval c = truncate([1, 2, 3], 4)");
    assert_eq!(global(&scope, "a"), "[2, 3]");
    assert_eq!(global(&scope, "b"), "[1, 2]");
    assert_eq!(global(&scope, "c"), "[1, 3]");

    assert_failure("int[] xs = []\nval a = truncate(xs, 0)");
}

#[test]
fn append_checks_the_element_tag() {
    assert_failure("val xs = append([1, 2], \"x\")");
    assert_success("val xs = append([1, \"a\"], true)");
}

#[test]
fn print_returns_the_joined_string() {
    let scope = run_program("val msg = print(\"a\", 1, true)");
    assert_eq!(global(&scope, "msg"), "a 1 true");
}

#[test]
fn builtin_arity_is_checked() {
    assert_failure("val x = len()");
    assert_failure("val x = random(1)");
    assert_failure("val x = append([1])");
}

#[test]
fn argument_binding_rules() {
    // Extra arguments are an error, missing ones keep their defaults.
    assert_failure("func f(int a)\nend f\nf(1, 2)");
    assert_failure("func f(int a)\nend f\nf(\"x\")");

    let scope = run_program("func f(int a) int\n  return a\nend f\nval d = f()");
    assert_eq!(global(&scope, "d"), "0");

    let scope = run_program("func g(val v) string\n  return typeOf(v)\nend g\nval t = \
                             g(\"s\")");
    assert_eq!(global(&scope, "t"), "string");
}

#[test]
fn recursion_limit_is_enforced_and_the_stack_collapses() {
    let error = run_source("_MAX_RECURSION = 64\nfunc spin()\n  spin()\nend spin\nspin()")
        .expect_err("unbounded recursion must fail");
    let rendered = error.to_string();
    assert!(rendered.contains("Maximum recursion depth of 64 exceeded"),
            "unexpected report:\n{rendered}");
    assert!(rendered.contains("(...)"), "expected a collapsed stack:\n{rendered}");
}

#[test]
fn unknown_commands_are_errors() {
    assert_failure("blah 1 2");
    assert_failure("val x = unknownName");
}

#[test]
fn empty_programs_are_no_ops() {
    assert_success("");
    assert_success("\n\n");
    assert_success("   \n\t\n");
}

#[test]
fn expression_statements_discard_their_value() {
    let scope = run_program("val x = 1\nx\nx + 2");
    assert_eq!(global(&scope, "x"), "1");
}
