/*!
# Introductory Tutorial for funny

A funny program is a plain text file. Words are separated by whitespace
and every word does one small thing to a stack of values. Save the
following as `hello.funny` and pass it to the executable.

<pre><code>&nbsp;  func main
&nbsp;      "Hello World\n" write
&nbsp;  end
</code></pre>

<pre><code>&nbsp;  $ funny hello.funny
&nbsp;  Hello World
</code></pre>

Stop a running program with CTRL-C.

## The stack

Numbers and quoted strings are pushed onto the stack. Everything else
takes its arguments from the stack and pushes its results back. The
value pushed first is the left hand side, so `10 4 -` is six.

<pre><code>&nbsp;  func main
&nbsp;      2 3 + .          // 5.0
&nbsp;      10 4 - .         // 6.0
&nbsp;      7 3 % .          // 1.0
&nbsp;  end
</code></pre>

`.` prints the top value as a number and `write` prints it as text.
Neither adds a newline. `dup`, `pop` and `:` duplicate, discard and
swap the values on top. `//` starts a comment that runs to the end of
the line, unless it is inside a string.

Comparisons `=`, `>` and `<` push `1.0` or `0.0`. Two values that
both look like numbers compare as numbers, anything else compares as
text. `not` turns a positive number into `0.0` and anything else into
`1.0`.

## Variables

`var` declares a variable in the current scope with the value `0`.
`@` takes a name and a value and stores it. Writing a variable's name
anywhere else pushes its value.

<pre><code>&nbsp;  func main
&nbsp;      var total
&nbsp;      40 total @
&nbsp;      total 2 + .      // 42.0
&nbsp;  end
</code></pre>

Storing into a name that was never declared creates it in the current
scope.

## Conditions and loops

`if` takes a number from the stack. A nonzero number runs the words up
to `else` or `end`. Variables declared inside an `if` remain visible after
its `end`.

<pre><code>&nbsp;  func main
&nbsp;      input 10 &gt; if "big" else "small" end write
&nbsp;  end
</code></pre>

`while` looks at the top of the stack without taking it. While that value
is nonzero the body runs again. The body has its own scope: variables
declared inside it are gone after the loop, but storing into a variable
from outside the loop changes that variable.

<pre><code>&nbsp;  func main
&nbsp;      var i 3 i @
&nbsp;      i while
&nbsp;          pop i . " " write
&nbsp;          i 1 - i @ i
&nbsp;      end
&nbsp;  end
</code></pre>

<pre><code>&nbsp;  3.0 2.0 1.0
</code></pre>

## Functions

`func name ... end` defines a function. Writing its name calls it. The
called function can see the variables of whoever called it.

<pre><code>&nbsp;  func square dup * end
&nbsp;  func main 4 square . end     // 16.0
</code></pre>

The top level of a file only collects definitions. Functions,
variable declarations, literals and `attach` are processed there, and
then `main` runs with an empty stack. A program with no `main` does
nothing visible.

## Attaching files

`attach` takes a file name and adds that file's functions to the
program. A function attached later replaces one with the same name.

<pre><code>&nbsp;  "lib.funny" attach
&nbsp;  func main greet end
</code></pre>

## Errors

Every error stops the program and reports where it happened.

<pre><code>&nbsp;  DIVISION BY ZERO IN main.funny:2:9
</code></pre>

Set `RUST_LOG=funny=debug` to see function definitions and attachments
on stderr as the program runs.

*/
